use crate::browser;
use crate::components::group_icon::GroupIconView;
use crate::components::ui::{
    Alert, AlertDescription, Button, ButtonSize, Card, CardContent, CardDescription, CardFooter,
    CardHeader, CardTitle,
};
use crate::page_store::PageStore;
use crate::share::{decode_shared_data, raw_query_param, ShareError, SHARED_DATA_PARAM};
use crate::state::AppContext;
use crate::theme::{apply_theme, system_theme};
use icons::Download;
use leptos::prelude::*;

fn read_shared_page() -> Result<crate::share::SharedPage, ShareError> {
    let search = browser::location_search();
    let raw = raw_query_param(&search, SHARED_DATA_PARAM).ok_or(ShareError::MissingPayload)?;
    decode_shared_data(raw)
}

/// Landing page for `/import?sharedData=...` links.
#[component]
pub fn ImportPage() -> impl IntoView {
    let store = expect_context::<AppContext>().0.store;

    let shared = match read_shared_page() {
        Ok(shared) => shared,
        Err(e) => {
            log::warn!("could not import shared page: {e}");
            return view! {
                <div class="min-h-screen bg-background text-foreground">
                    <div class="mx-auto w-full max-w-[720px] px-4 py-8">
                        <Alert class="border-destructive/30">
                            <AlertDescription class="text-destructive">{e.to_string()}</AlertDescription>
                        </Alert>
                        <a class="mt-4 inline-block text-sm text-primary underline underline-offset-4" href="/dashboard">
                            "Go to dashboard"
                        </a>
                    </div>
                </div>
            }
            .into_any();
        }
    };

    let document = shared.into_document(system_theme());
    apply_theme(document.theme, document.custom_primary_color.as_deref());

    let title = document.page_title.clone();
    let groups = document
        .link_groups
        .iter()
        .map(|g| {
            let count = g.urls.len();
            view! {
                <li class="flex items-center gap-2 text-sm">
                    <GroupIconView name=g.icon.clone() class="size-4" />
                    <span class="font-medium">{g.name.clone()}</span>
                    <span class="text-xs text-muted-foreground">
                        {format!("{count} link{}", if count == 1 { "" } else { "s" })}
                    </span>
                </li>
            }
        })
        .collect_view();
    let document = StoredValue::new(document);

    let on_save = move |_| {
        let (hash, _) = PageStore::new(store).save_new(document.get_value());
        log::info!("imported shared page as {hash}");
        browser::navigate(&format!("/#{hash}"));
    };

    view! {
        <div class="min-h-screen bg-background text-foreground">
            <div class="mx-auto w-full max-w-[720px] px-4 py-8">
                <Card>
                    <CardHeader>
                        <div class="space-y-1">
                            <CardTitle class="text-lg">{title}</CardTitle>
                            <CardDescription>"Someone shared this page with you."</CardDescription>
                        </div>
                    </CardHeader>
                    <CardContent>
                        <ul class="flex flex-col gap-2">{groups}</ul>
                    </CardContent>
                    <CardFooter class="justify-end">
                        <a class="text-sm text-muted-foreground hover:text-foreground" href="/dashboard">
                            "Cancel"
                        </a>
                        <Button size=ButtonSize::Sm on:click=on_save>
                            <Download class="size-4" />
                            "Save to my pages"
                        </Button>
                    </CardFooter>
                </Card>
            </div>
        </div>
    }
    .into_any()
}
