use crate::domain::a001_sale_row_images::ui::list::SaleRowImagesList;
use crate::layout::StandaloneNotice;
use crate::system::host_handshake;
use contracts::system::host::Handshake;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    let mode = host_handshake::detect_mode();
    log::info!("Starting in {:?} mode", mode);

    let handshake = RwSignal::new(Handshake::start(mode));

    // Listener and timer live exactly as long as this component.
    let subscription = StoredValue::new_local(host_handshake::connect(handshake));
    on_cleanup(move || {
        subscription.try_update_value(|s| s.take());
    });

    let waiting = Memo::new(move |_| handshake.with(Handshake::is_waiting));
    let app_context = Memo::new(move |_| handshake.with(|hs| hs.context().cloned()));
    let has_context = Memo::new(move |_| app_context.with(Option::is_some));

    view! {
        // Nothing is rendered while an embedded widget waits for its host.
        <Show when=move || !waiting.get()>
            <Show
                when=move || has_context.get()
                fallback=|| view! { <StandaloneNotice /> }
            >
                <SaleRowImagesList app_context=app_context />
            </Show>
        </Show>
    }
}
