pub mod board;
pub mod metals;

use yew::html::BaseComponent;

/// Server-side renders `C` without hydration markers.
pub async fn render<C>(props: C::Properties) -> String
where
    C: BaseComponent,
    C::Properties: Send + 'static,
{
    yew::ServerRenderer::<C>::with_props(move || props)
        .hydratable(false)
        .render()
        .await
}

/// Full HTML document rendered from a page component.
pub async fn render_page<C>(props: C::Properties) -> String
where
    C: BaseComponent,
    C::Properties: Send + 'static,
{
    format!("<!DOCTYPE html>{}", render::<C>(props).await)
}
