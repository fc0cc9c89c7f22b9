use leptos::prelude::*;

/// Shown when the widget is opened outside the host application.
#[component]
pub fn StandaloneNotice() -> impl IntoView {
    view! {
        <div class="standalone-notice">
            <div class="standalone-notice__card">
                <h1 class="standalone-notice__title">"Verkoop Afbeeldingen"</h1>
                <p class="standalone-notice__text">
                    "Deze applicatie toont een overzicht van alle verkoopdocument detailregels met gekoppelde afbeeldingen."
                </p>
                <div class="standalone-notice__hint">
                    "Open deze pagina via Winfakt Online om de afbeeldingen te bekijken."
                </div>
            </div>
        </div>
    }
}
