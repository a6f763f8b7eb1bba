use leptos::prelude::*;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="max-w-3xl mx-auto px-4 py-16 text-center">
            <h1 class="text-4xl font-bold text-gray-900 mb-4">"Page not found"</h1>
            <p class="text-gray-600 mb-8">"The page you were looking for does not exist."</p>
            <a href="/" class="text-blue-600 hover:underline">"Back to home"</a>
        </div>
    }
}
