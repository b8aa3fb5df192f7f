use crate::browser;
use crate::components::group_card::{allow_drop, dropped_index, start_drag};
use crate::components::ui::{
    Alert, AlertDescription, Button, ButtonSize, ButtonVariant, Card, CardDescription, CardHeader,
    CardTitle, Input,
};
use crate::dashboard::Dashboard;
use crate::models::{PageDocument, PageSummary};
use crate::page_store::PageStore;
use crate::state::AppContext;
use crate::theme::{apply_theme, system_theme, DashboardPrefs};
use crate::util::move_item;
use icons::{GripVertical, Plus, Share2, Trash2};
use leptos::prelude::*;

fn format_modified(ms: Option<i64>) -> String {
    let Some(ms) = ms else {
        return "Never edited".to_string();
    };
    let d = js_sys::Date::new(&wasm_bindgen::JsValue::from_f64(ms as f64));
    format!(
        "Edited {:04}-{:02}-{:02} {:02}:{:02}",
        d.get_full_year(),
        d.get_month() + 1,
        d.get_date(),
        d.get_hours(),
        d.get_minutes()
    )
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let share_origin = StoredValue::new(app_state.0.config.share_origin());
    let store = app_state.0.store;
    let dashboard = move || Dashboard::new(store);

    let pages: RwSignal<Vec<PageSummary>> = RwSignal::new(vec![]);
    let prefs: RwSignal<DashboardPrefs> = RwSignal::new(DashboardPrefs::load(&store));
    let color_value: RwSignal<String> = RwSignal::new(String::new());
    let notice: RwSignal<Option<String>> = RwSignal::new(None);

    let reload = move || {
        pages.set(dashboard().list_pages(system_theme()));
    };

    Effect::new(move |_| {
        reload();
    });

    Effect::new(move |_| {
        let p = prefs.get();
        apply_theme(
            p.mode.resolve(system_theme()),
            p.custom_primary_color.as_deref(),
        );
        color_value.set(p.custom_primary_color.unwrap_or_else(|| "#000000".to_string()));
    });

    let update_prefs = move |f: &dyn Fn(&mut DashboardPrefs)| {
        let mut next = prefs.get_untracked();
        f(&mut next);
        next.save(&store);
        prefs.set(next);
    };

    let on_new_page = move |_| {
        let hash = PageStore::new(store).create_page(PageDocument::new_default(system_theme()));
        browser::navigate(&format!("/#{hash}"));
    };

    let on_delete = move |hash: String| {
        if !window()
            .confirm_with_message("Delete this page and all of its groups?")
            .unwrap_or(false)
        {
            return;
        }
        pages.update(|xs| dashboard().delete_page(&hash, xs));
    };

    let on_share = move |hash: String| match dashboard().share_link(
        &share_origin.get_value(),
        &hash,
        system_theme(),
    ) {
        Some(Ok(url)) => {
            if browser::copy_to_clipboard(&url) {
                notice.set(Some("Share link copied to clipboard".to_string()));
            } else {
                notice.set(Some(format!("Copy this link to share: {url}")));
            }
        }
        Some(Err(e)) => {
            log::warn!("could not build share link for {hash}: {e}");
            notice.set(Some(e.to_string()));
        }
        None => notice.set(Some("That page could not be read".to_string())),
    };

    let on_move = move |from: usize, to: usize| {
        pages.update(|xs| move_item(xs, from, to));
        dashboard().reorder(&pages.get_untracked());
    };

    view! {
        <div class="min-h-screen bg-background text-foreground">
            <div class="mx-auto w-full max-w-[1080px] px-4 py-8">
                <div class="mb-6 flex flex-wrap items-center justify-between gap-3">
                    <div class="space-y-1">
                        <h1 class="text-xl font-semibold">"Your pages"</h1>
                        <p class="text-xs text-muted-foreground">
                            {move || format!("{} total", pages.get().len())}
                        </p>
                    </div>

                    <div class="flex flex-wrap items-center gap-2">
                        <Button
                            variant=ButtonVariant::Ghost
                            size=ButtonSize::Sm
                            attr:title="Theme"
                            on:click=move |_| update_prefs(&|p: &mut DashboardPrefs| p.mode = p.mode.next())
                        >
                            {move || format!("Theme: {}", prefs.get().mode.label())}
                        </Button>
                        <Input
                            r#type="color"
                            class="h-9 w-12 cursor-pointer p-1"
                            bind_value=color_value
                            on_commit=move |v: String| {
                                update_prefs(&|p: &mut DashboardPrefs| p.custom_primary_color = Some(v.clone()))
                            }
                        />
                        <Show when=move || prefs.get().custom_primary_color.is_some() fallback=|| ().into_view()>
                            <Button
                                variant=ButtonVariant::Ghost
                                size=ButtonSize::Sm
                                on:click=move |_| update_prefs(&|p: &mut DashboardPrefs| p.custom_primary_color = None)
                            >
                                "Reset color"
                            </Button>
                        </Show>
                        <Button size=ButtonSize::Sm on:click=on_new_page>
                            <Plus class="size-4" />
                            "New page"
                        </Button>
                    </div>
                </div>

                {move || notice.get().map(|n| view! {
                    <Alert class="mb-4 flex items-center justify-between gap-3">
                        <AlertDescription>{n}</AlertDescription>
                        <button
                            class="text-xs text-muted-foreground hover:text-foreground"
                            on:click=move |_| notice.set(None)
                        >
                            "Dismiss"
                        </button>
                    </Alert>
                })}

                <Show
                    when=move || !pages.get().is_empty()
                    fallback=|| view! {
                        <div class="text-sm text-muted-foreground">
                            "No pages yet. Create one to start collecting links."
                        </div>
                    }
                >
                    <div class="grid gap-3 sm:grid-cols-2">
                        {move || {
                            pages
                                .get()
                                .into_iter()
                                .enumerate()
                                .map(|(index, summary)| {
                                    let href = format!("/#{}", summary.hash);
                                    let hash_for_share = summary.hash.clone();
                                    let hash_for_delete = summary.hash.clone();
                                    let swatch = summary
                                        .custom_primary_color
                                        .clone()
                                        .map(|c| format!("background-color: {c}"))
                                        .unwrap_or_default();

                                    view! {
                                        <Card
                                            class="group relative"
                                            attr:draggable="true"
                                            on:dragstart=move |ev: web_sys::DragEvent| start_drag(&ev, "page", index)
                                            on:dragover=move |ev: web_sys::DragEvent| allow_drop(&ev)
                                            on:drop=move |ev: web_sys::DragEvent| {
                                                ev.prevent_default();
                                                if let Some(from) = dropped_index(&ev, "page") {
                                                    if from != index {
                                                        on_move(from, index);
                                                    }
                                                }
                                            }
                                        >
                                            <CardHeader>
                                                <a class="flex min-w-0 flex-1 items-center gap-2" href=href>
                                                    <GripVertical class="size-4 cursor-grab text-muted-foreground" />
                                                    <span
                                                        class="size-3 shrink-0 rounded-full border bg-primary"
                                                        style=swatch
                                                    />
                                                    <div class="min-w-0 space-y-1">
                                                        <CardTitle class="truncate text-sm">{summary.title.clone()}</CardTitle>
                                                        <CardDescription class="text-xs">
                                                            {format!(
                                                                "{} group{} · {} · {}",
                                                                summary.group_count,
                                                                if summary.group_count == 1 { "" } else { "s" },
                                                                if summary.theme.is_dark() { "dark" } else { "light" },
                                                                format_modified(summary.last_modified)
                                                            )}
                                                        </CardDescription>
                                                    </div>
                                                </a>
                                                <div class="flex items-center gap-1">
                                                    <Button
                                                        variant=ButtonVariant::Ghost
                                                        size=ButtonSize::Icon
                                                        class="h-7 w-7"
                                                        attr:title="Copy share link"
                                                        on:click=move |_| on_share(hash_for_share.clone())
                                                    >
                                                        <Share2 class="size-4" />
                                                    </Button>
                                                    <Button
                                                        variant=ButtonVariant::Ghost
                                                        size=ButtonSize::Icon
                                                        class="h-7 w-7 text-destructive"
                                                        attr:title="Delete page"
                                                        on:click=move |_| on_delete(hash_for_delete.clone())
                                                    >
                                                        <Trash2 class="size-4" />
                                                    </Button>
                                                </div>
                                            </CardHeader>
                                        </Card>
                                    }
                                })
                                .collect_view()
                        }}
                    </div>
                </Show>
            </div>
        </div>
    }
}
