//! Debounced search input for the tool directory.
//!
//! # Design
//! - Keep local input state for immediate typing feedback.
//! - Emit debounced values to the caller for shared state updates.
//! - The debouncer is rebuilt only when the wait changes; each render rebinds
//!   the latest `on_search`, so a parent re-render never drops a pending query.

use std::time::Duration;

use yew::prelude::*;

use crate::core::debounce::debounce;
use crate::web::WebHost;

#[derive(Properties, PartialEq)]
pub(crate) struct SearchInputProps {
    #[prop_or_default]
    pub value: AttrValue,
    #[prop_or_default]
    pub placeholder: Option<AttrValue>,
    #[prop_or_default]
    pub aria_label: Option<AttrValue>,
    #[prop_or(250)]
    pub debounce_ms: u32,
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub on_search: Callback<String>,
}

#[function_component(SearchInput)]
pub(crate) fn search_input(props: &SearchInputProps) -> Html {
    let draft = use_state(|| props.value.to_string());

    {
        let draft = draft.clone();
        let external = props.value.clone();
        use_effect_with_deps(
            move |external| {
                let next = external.to_string();
                if *draft != next {
                    draft.set(next);
                }
                || ()
            },
            external,
        );
    }

    let debounced = use_memo(
        |debounce_ms| {
            debounce(
                WebHost::new(),
                Duration::from_millis(u64::from(*debounce_ms)),
                |_: String| (),
            )
        },
        props.debounce_ms,
    );
    {
        let on_search = props.on_search.clone();
        debounced.set_callback(move |query: String| on_search.emit(query));
    }

    let oninput = {
        let on_search = props.on_search.clone();
        let draft = draft.clone();
        let immediate = props.debounce_ms == 0;
        Callback::from(move |event: InputEvent| {
            let Some(input) = event.target_dyn_into::<web_sys::HtmlInputElement>() else {
                return;
            };
            let next = input.value();
            draft.set(next.clone());
            if immediate {
                on_search.emit(next);
            } else {
                debounced.call(next);
            }
        })
    };

    html! {
        <label class={classes!("flex", "items-center", "gap-2", props.class.clone())}>
            <span class="iconify lucide--search size-4 opacity-70"></span>
            <input
                class="w-full bg-transparent outline-none placeholder:text-sm"
                type="search"
                placeholder={props.placeholder.clone()}
                value={AttrValue::from((*draft).clone())}
                aria-label={props.aria_label.clone()}
                {oninput}
            />
        </label>
    }
}
