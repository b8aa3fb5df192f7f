use crate::config::EnvConfig;
use crate::pages::{DashboardPage, ImportPage, LinkPage};
use crate::state::{AppContext, AppState};
use crate::storage::BrowserStore;
use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

#[component]
pub fn App() -> impl IntoView {
    provide_context(AppContext(AppState::new(EnvConfig::new(), BrowserStore)));

    // The page view is addressed by the URL fragment, which the router ignores.
    view! {
        <Router>
            <Routes fallback=|| view! { <div class="px-4 py-8 text-xs text-muted-foreground">"Not found"</div> }>
                <Route path=path!("dashboard") view=DashboardPage />
                <Route path=path!("import") view=ImportPage />
                <Route path=path!("") view=LinkPage />
            </Routes>
        </Router>
    }
}
