use crate::components::group_icon::{GroupIcon, GroupIconView};
use crate::components::ui::{
    Button, ButtonSize, Card, CardContent, CardFooter, CardHeader, CardTitle, Input, Label,
    Textarea,
};
use crate::forms::{GroupForm, GroupFormErrors};
use crate::models::LinkGroup;
use crate::util::new_group_id;
use leptos::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum EditorTarget {
    New,
    Edit(LinkGroup),
}

/// Modal add/edit form for one link group.
#[component]
pub fn GroupEditor(
    target: EditorTarget,
    #[prop(into)] on_save: Callback<LinkGroup>,
    #[prop(into)] on_cancel: Callback<()>,
) -> impl IntoView {
    let (existing_id, form) = match &target {
        EditorTarget::New => (
            None,
            GroupForm {
                icon: GroupIcon::default().to_string(),
                ..Default::default()
            },
        ),
        EditorTarget::Edit(g) => (Some(g.id.clone()), GroupForm::from_group(g)),
    };
    let title = if existing_id.is_some() {
        "Edit group"
    } else {
        "New group"
    };
    let existing_id = StoredValue::new(existing_id);

    let name: RwSignal<String> = RwSignal::new(form.name);
    let icon: RwSignal<String> = RwSignal::new(form.icon);
    let urls: RwSignal<String> = RwSignal::new(form.urls);
    let errors: RwSignal<GroupFormErrors> = RwSignal::new(GroupFormErrors::default());

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let form = GroupForm {
            name: name.get_untracked(),
            icon: icon.get_untracked(),
            urls: urls.get_untracked(),
        };
        let id = existing_id.get_value().unwrap_or_else(new_group_id);
        match form.validate(id) {
            Ok(group) => {
                errors.set(GroupFormErrors::default());
                on_save.run(group);
            }
            Err(e) => errors.set(e),
        }
    };

    view! {
        <div
            class="fixed inset-0 z-50 flex items-center justify-center bg-black/50 p-4"
            on:click=move |_| on_cancel.run(())
        >
            <Card
                class="w-full max-w-lg"
                on:click=move |ev: web_sys::MouseEvent| ev.stop_propagation()
            >
                <CardHeader>
                    <CardTitle class="text-lg">{title}</CardTitle>
                </CardHeader>

                <form class="flex flex-col gap-4" on:submit=on_submit>
                    <CardContent class="flex flex-col gap-4">
                        <div class="flex flex-col gap-2">
                            <Label html_for="group-name">"Name"</Label>
                            <Input id="group-name" placeholder="Dev tools" bind_value=name autofocus=true />
                            {move || errors.get().name.map(|e| view! {
                                <p class="text-xs text-destructive">{e}</p>
                            })}
                        </div>

                        <div class="flex flex-col gap-2">
                            <Label>"Icon"</Label>
                            <div class="flex flex-wrap gap-1">
                                {GroupIcon::all()
                                    .into_iter()
                                    .map(|candidate| {
                                        let candidate_name = candidate.to_string();
                                        let for_click = candidate_name.clone();
                                        let for_class = candidate_name.clone();
                                        let for_title = candidate_name.clone();
                                        view! {
                                            <button
                                                type="button"
                                                title=for_title
                                                class=move || {
                                                    if icon.get() == for_class {
                                                        "rounded-md border border-primary bg-primary/10 p-1.5"
                                                    } else {
                                                        "rounded-md border border-transparent p-1.5 hover:bg-accent"
                                                    }
                                                }
                                                on:click=move |_| icon.set(for_click.clone())
                                            >
                                                <GroupIconView name=candidate_name class="size-4" />
                                            </button>
                                        }
                                    })
                                    .collect_view()}
                            </div>
                        </div>

                        <div class="flex flex-col gap-2">
                            <Label html_for="group-urls">"Links (one per line)"</Label>
                            <Textarea
                                id="group-urls"
                                rows=6
                                placeholder="github.com\nhttps://docs.rs"
                                bind_value=urls
                            />
                            {move || errors.get().urls.map(|e| view! {
                                <p class="text-xs text-destructive">{e}</p>
                            })}
                        </div>
                    </CardContent>

                    <CardFooter class="justify-end">
                        <button
                            type="button"
                            class="h-8 rounded-md px-3 text-sm font-medium hover:bg-accent"
                            on:click=move |_| on_cancel.run(())
                        >
                            "Cancel"
                        </button>
                        <Button size=ButtonSize::Sm>"Save"</Button>
                    </CardFooter>
                </form>
            </Card>
        </div>
    }
}
