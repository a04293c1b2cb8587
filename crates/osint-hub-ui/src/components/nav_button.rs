//! Sidebar navigation button with optional hover/focus preloading.

use yew::prelude::*;

use crate::core::preload::HoverBindings;
use crate::core::theme::{AccentColor, ButtonVariants};

/// Props for a sidebar navigation entry.
#[derive(Properties, PartialEq)]
pub(crate) struct NavButtonProps {
    /// Visible label.
    pub label: AttrValue,
    /// Whether this entry is the current view.
    #[prop_or_default]
    pub active: bool,
    /// Whether the dark appearance is active.
    #[prop_or(true)]
    pub is_dark: bool,
    /// Accent palette; the brand accent uses the primary variant.
    #[prop_or_default]
    pub accent: AccentColor,
    /// Preload bindings fired on pointer-enter and keyboard focus.
    #[prop_or_default]
    pub preload: Option<HoverBindings>,
    /// Click handler.
    #[prop_or_default]
    pub onclick: Callback<MouseEvent>,
}

#[function_component(NavButton)]
pub(crate) fn nav_button(props: &NavButtonProps) -> Html {
    let class = if props.accent == AccentColor::Osint {
        ButtonVariants::primary(props.is_dark, props.active)
    } else {
        ButtonVariants::themed(props.is_dark, props.accent, props.active)
    };

    let onmouseenter = props.preload.as_ref().map(|bindings| {
        let trigger = bindings.on_mouse_enter.clone();
        Callback::from(move |_: MouseEvent| trigger.fire())
    });
    let onfocus = props.preload.as_ref().map(|bindings| {
        let trigger = bindings.on_focus.clone();
        Callback::from(move |_: FocusEvent| trigger.fire())
    });

    html! {
        <button
            {class}
            type="button"
            aria-current={props.active.then_some(AttrValue::Static("page"))}
            onclick={props.onclick.clone()}
            {onmouseenter}
            {onfocus}
        >
            {props.label.clone()}
        </button>
    }
}
