use leptos::prelude::*;
use leptos_router::components::*;
use leptos_router::path;

use crate::pages::workflow::WorkflowPage;

#[component]
pub fn App() -> impl IntoView {
    view! {
        <Router>
            <Routes fallback=|| view! { <p>"Page not found"</p> }>
                <Route path=path!("/") view=WorkflowPage />
            </Routes>
        </Router>
    }
}
