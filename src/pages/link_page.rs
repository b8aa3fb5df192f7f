use crate::components::group_card::GroupCard;
use crate::components::group_editor::{EditorTarget, GroupEditor};
use crate::components::ui::{
    Alert, AlertDescription, Button, ButtonSize, ButtonVariant, Card, CardContent, CardDescription,
    CardHeader, CardTitle, Input, Spinner,
};
use crate::models::{LinkGroup, Theme};
use crate::state::{AppContext, PagePhase};
use crate::storage::{save_flag, TOUR_TAKEN_KEY};
use crate::util::move_item;
use icons::{Download, LayoutDashboard, Moon, Plus, Share2, Sun, Trash2};
use leptos::ev;
use leptos::prelude::*;
use leptos_dom::helpers::window_event_listener;

fn confirm(message: &str) -> bool {
    window().confirm_with_message(message).unwrap_or(false)
}

#[component]
pub fn LinkPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let page = app_state.0.page;
    let tour_taken = app_state.0.tour_taken;
    let store = app_state.0.store;
    let share_origin = StoredValue::new(app_state.0.config.share_origin());

    Effect::new(move |_| {
        page.load_from_location();
    });

    let hash_handle = window_event_listener(ev::hashchange, move |_ev: web_sys::HashChangeEvent| {
        page.on_hash_change();
    });
    on_cleanup(move || hash_handle.remove());

    let title_value: RwSignal<String> = RwSignal::new(String::new());
    let color_value: RwSignal<String> = RwSignal::new(String::new());
    Effect::new(move |_| {
        let doc = page.document.get();
        title_value.set(doc.page_title);
        color_value.set(doc.custom_primary_color.unwrap_or_else(|| "#000000".to_string()));
    });

    let editor: RwSignal<Option<EditorTarget>> = RwSignal::new(None);

    let on_save_group = move |group: LinkGroup| {
        let mut groups = page.document.get_untracked().link_groups;
        match groups.iter_mut().find(|g| g.id == group.id) {
            Some(slot) => *slot = group,
            None => groups.push(group),
        }
        page.set_link_groups(groups);
        editor.set(None);
    };

    let on_delete_group = move |group_id: String| {
        if !confirm("Delete this group?") {
            return;
        }
        let mut groups = page.document.get_untracked().link_groups;
        groups.retain(|g| g.id != group_id);
        page.set_link_groups(groups);
    };

    let on_move_group = move |(from, to): (usize, usize)| {
        let mut groups = page.document.get_untracked().link_groups;
        move_item(&mut groups, from, to);
        page.set_link_groups(groups);
    };

    let on_delete_page = move |_| {
        if confirm("Delete this page and all of its groups?") {
            page.delete_current_page();
        }
    };

    let dismiss_tour = move |_| {
        save_flag(&store, TOUR_TAKEN_KEY, true);
        tour_taken.set(true);
    };

    let is_preview = move || page.phase.get() == PagePhase::Preview;

    view! {
        <div class="min-h-screen bg-background text-foreground">
            <div class="mx-auto w-full max-w-[1080px] px-4 py-8">
                {move || match page.phase.get() {
                    PagePhase::Loading => view! {
                        <div class="flex items-center gap-2 text-sm text-muted-foreground">
                            <Spinner />
                            "Loading page..."
                        </div>
                    }
                    .into_any(),
                    PagePhase::ImportError => view! {
                        <Alert class="border-destructive/30">
                            <AlertDescription class="text-destructive">
                                {move || page.error.get().unwrap_or_default()}
                            </AlertDescription>
                        </Alert>
                        <a class="mt-4 inline-block text-sm text-primary underline underline-offset-4" href="/dashboard">
                            "Go to dashboard"
                        </a>
                    }
                    .into_any(),
                    PagePhase::Ready | PagePhase::Preview => view! {
                        <div class="mb-6 flex flex-wrap items-center justify-between gap-3">
                            <Input
                                class="h-10 max-w-md text-xl font-semibold"
                                bind_value=title_value
                                on_commit=move |v: String| {
                                    if v != page.document.get_untracked().page_title {
                                        page.set_page_title(v);
                                    }
                                }
                            />

                            <div class="flex flex-wrap items-center gap-2">
                                <Button
                                    variant=ButtonVariant::Ghost
                                    size=ButtonSize::Icon
                                    attr:title="Toggle theme"
                                    on:click=move |_| {
                                        let theme = page.document.get_untracked().theme;
                                        page.set_theme(theme.toggled());
                                    }
                                >
                                    {move || if page.document.get().theme == Theme::Dark {
                                        view! { <Sun class="size-4" /> }.into_any()
                                    } else {
                                        view! { <Moon class="size-4" /> }.into_any()
                                    }}
                                </Button>

                                <Input
                                    r#type="color"
                                    class="h-9 w-12 cursor-pointer p-1"
                                    bind_value=color_value
                                    on_commit=move |v: String| page.set_custom_primary_color(Some(v))
                                />
                                <Show when=move || page.document.get().custom_primary_color.is_some() fallback=|| ().into_view()>
                                    <Button
                                        variant=ButtonVariant::Ghost
                                        size=ButtonSize::Sm
                                        on:click=move |_| page.set_custom_primary_color(None)
                                    >
                                        "Reset color"
                                    </Button>
                                </Show>

                                <Button size=ButtonSize::Sm on:click=move |_| editor.set(Some(EditorTarget::New))>
                                    <Plus class="size-4" />
                                    "Add group"
                                </Button>
                                <Button
                                    variant=ButtonVariant::Outline
                                    size=ButtonSize::Sm
                                    on:click=move |_| page.copy_share_link(&share_origin.get_value())
                                >
                                    <Share2 class="size-4" />
                                    "Share"
                                </Button>
                                <Button
                                    variant=ButtonVariant::Outline
                                    size=ButtonSize::Sm
                                    on:click=move |_| page.create_new_page()
                                >
                                    "New page"
                                </Button>
                                <a
                                    class="inline-flex h-8 items-center gap-1.5 rounded-md border px-3 text-sm font-medium shadow-xs hover:bg-accent"
                                    href="/dashboard"
                                >
                                    <LayoutDashboard class="size-4" />
                                    "Dashboard"
                                </a>
                                <Show when=move || !is_preview() fallback=|| ().into_view()>
                                    <Button
                                        variant=ButtonVariant::Ghost
                                        size=ButtonSize::Icon
                                        class="text-destructive"
                                        attr:title="Delete page"
                                        on:click=on_delete_page
                                    >
                                        <Trash2 class="size-4" />
                                    </Button>
                                </Show>
                            </div>
                        </div>

                        <Show when=is_preview fallback=|| ().into_view()>
                            <Alert class="mb-4 flex items-center justify-between gap-3">
                                <AlertDescription>
                                    "This is a shared page. Save it or edit anything to keep a copy."
                                </AlertDescription>
                                <Button size=ButtonSize::Sm on:click=move |_| page.save_preview()>
                                    <Download class="size-4" />
                                    "Save page"
                                </Button>
                            </Alert>
                        </Show>

                        {move || page.notice.get().map(|n| view! {
                            <Alert class="mb-4 flex items-center justify-between gap-3">
                                <AlertDescription>{n}</AlertDescription>
                                <button
                                    class="text-xs text-muted-foreground hover:text-foreground"
                                    on:click=move |_| page.notice.set(None)
                                >
                                    "Dismiss"
                                </button>
                            </Alert>
                        })}

                        <Show when=move || !tour_taken.get() && !is_preview() fallback=|| ().into_view()>
                            <Card class="mb-4">
                                <CardHeader>
                                    <CardTitle>"Welcome to LinkWarp"</CardTitle>
                                </CardHeader>
                                <CardContent class="flex flex-col gap-2">
                                    <CardDescription>
                                        "Group links with an icon, drag groups to reorder them, and open a whole group at once. "
                                        "Pages live in this browser; bookmark the address to come back. "
                                        "Use Share to send a copy, and the dashboard to see all of your pages."
                                    </CardDescription>
                                    <Button class="self-start" size=ButtonSize::Sm on:click=dismiss_tour>
                                        "Got it"
                                    </Button>
                                </CardContent>
                            </Card>
                        </Show>

                        <div class="grid gap-4 sm:grid-cols-2 lg:grid-cols-3">
                            {move || {
                                let groups = page.document.get().link_groups;
                                if groups.is_empty() {
                                    return view! {
                                        <div class="text-sm text-muted-foreground">
                                            "No groups yet. Add one to get started."
                                        </div>
                                    }
                                    .into_any();
                                }
                                groups
                                    .into_iter()
                                    .enumerate()
                                    .map(|(index, group)| view! {
                                        <GroupCard
                                            group=group
                                            index=index
                                            on_open=move |g: LinkGroup| page.open_group(&g)
                                            on_open_window=move |id: String| page.open_group_in_new_window(&id)
                                            on_edit=move |g: LinkGroup| editor.set(Some(EditorTarget::Edit(g)))
                                            on_delete=on_delete_group
                                            on_move=on_move_group
                                        />
                                    })
                                    .collect_view()
                                    .into_any()
                            }}
                        </div>
                    }
                    .into_any(),
                }}
            </div>

            {move || editor.get().map(|target| view! {
                <GroupEditor
                    target=target
                    on_save=on_save_group
                    on_cancel=move |_: ()| editor.set(None)
                />
            })}
        </div>
    }
}
