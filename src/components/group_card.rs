use crate::components::group_icon::GroupIconView;
use crate::components::ui::{
    Button, ButtonSize, ButtonVariant, Card, CardContent, CardHeader, CardTitle,
};
use crate::models::LinkGroup;
use crate::util::normalize_url;
use icons::{AppWindow, ExternalLink, GripVertical, Pencil, Trash2};
use leptos::prelude::*;

pub(crate) const DRAG_MIME: &str = "text/plain";

/// `kind:index`; the kind keeps foreign drops (text, files, other lists) out.
pub(crate) fn drag_payload(kind: &str, index: usize) -> String {
    format!("{kind}:{index}")
}

pub(crate) fn parse_drag_payload(kind: &str, data: &str) -> Option<usize> {
    data.strip_prefix(kind)?.strip_prefix(':')?.parse().ok()
}

/// Read the dragged index off a drop event.
pub(crate) fn dropped_index(ev: &web_sys::DragEvent, kind: &str) -> Option<usize> {
    let data = ev.data_transfer()?.get_data(DRAG_MIME).ok()?;
    parse_drag_payload(kind, &data)
}

pub(crate) fn start_drag(ev: &web_sys::DragEvent, kind: &str, index: usize) {
    if let Some(dt) = ev.data_transfer() {
        let _ = dt.set_data(DRAG_MIME, &drag_payload(kind, index));
        dt.set_effect_allowed("move");
    }
}

pub(crate) fn allow_drop(ev: &web_sys::DragEvent) {
    ev.prevent_default();
    if let Some(dt) = ev.data_transfer() {
        dt.set_drop_effect("move");
    }
}

#[component]
pub fn GroupCard(
    group: LinkGroup,
    index: usize,
    #[prop(into)] on_open: Callback<LinkGroup>,
    #[prop(into)] on_open_window: Callback<String>,
    #[prop(into)] on_edit: Callback<LinkGroup>,
    #[prop(into)] on_delete: Callback<String>,
    /// `(from, to)` indices after a drop.
    #[prop(into)] on_move: Callback<(usize, usize)>,
) -> impl IntoView {
    let group_sv = StoredValue::new(group.clone());

    let links = group
        .urls
        .iter()
        .map(|raw| {
            let href = normalize_url(raw);
            let label = raw.clone();
            view! {
                <li class="truncate">
                    <a
                        class="text-sm text-primary underline-offset-4 hover:underline"
                        href=href
                        target="_blank"
                        rel="noopener noreferrer"
                    >
                        {label}
                    </a>
                </li>
            }
        })
        .collect_view();

    view! {
        <Card
            class="group relative"
            attr:draggable="true"
            on:dragstart=move |ev: web_sys::DragEvent| start_drag(&ev, "group", index)
            on:dragover=move |ev: web_sys::DragEvent| allow_drop(&ev)
            on:drop=move |ev: web_sys::DragEvent| {
                ev.prevent_default();
                if let Some(from) = dropped_index(&ev, "group") {
                    if from != index {
                        on_move.run((from, index));
                    }
                }
            }
        >
            <CardHeader>
                <div class="flex min-w-0 items-center gap-2">
                    <GripVertical class="size-4 cursor-grab text-muted-foreground" />
                    <GroupIconView name=group.icon.clone() />
                    <CardTitle class="truncate text-base">{group.name.clone()}</CardTitle>
                </div>
                <div class="flex items-center gap-1">
                    <Button
                        variant=ButtonVariant::Ghost
                        size=ButtonSize::Icon
                        class="h-7 w-7"
                        attr:title="Open all links"
                        on:click=move |_| on_open.run(group_sv.get_value())
                    >
                        <ExternalLink class="size-4" />
                    </Button>
                    <Button
                        variant=ButtonVariant::Ghost
                        size=ButtonSize::Icon
                        class="h-7 w-7"
                        attr:title="Open in new window"
                        on:click=move |_| on_open_window.run(group_sv.get_value().id)
                    >
                        <AppWindow class="size-4" />
                    </Button>
                    <Button
                        variant=ButtonVariant::Ghost
                        size=ButtonSize::Icon
                        class="h-7 w-7"
                        attr:title="Edit group"
                        on:click=move |_| on_edit.run(group_sv.get_value())
                    >
                        <Pencil class="size-4" />
                    </Button>
                    <Button
                        variant=ButtonVariant::Ghost
                        size=ButtonSize::Icon
                        class="h-7 w-7 text-destructive"
                        attr:title="Delete group"
                        on:click=move |_| on_delete.run(group_sv.get_value().id)
                    >
                        <Trash2 class="size-4" />
                    </Button>
                </div>
            </CardHeader>
            <CardContent>
                <ul class="flex flex-col gap-1">{links}</ul>
            </CardContent>
        </Card>
    }
}
