//! Application shell: theme, navigation, search and chunk warming.

use std::rc::Rc;

use osint_hub_telemetry::SharedObserver;
use yew::prelude::*;

use crate::components::nav_button::NavButton;
use crate::components::search_input::SearchInput;
use crate::core::config::UiConfig;
use crate::core::preferences::Preferences;
use crate::core::preload::{ComponentImport, Preloader};
use crate::core::storage::Storage;
use crate::core::theme::{AccentColor, ButtonVariants, create_theme};
use crate::web::{BrowserStore, ConsoleObserver, WebHost, prefetch_import};

const UI_COMPONENTS_CHUNK: &str = "/chunks/ui-components.js";
const APP_DATA_CHUNK: &str = "/chunks/app-data.js";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum View {
    Tools,
    Favorites,
    History,
}

struct Services {
    config: UiConfig,
    preferences: Preferences<BrowserStore>,
    preloader: Preloader<WebHost>,
    ui_components: ComponentImport,
    app_data: ComponentImport,
}

impl Services {
    fn new() -> Self {
        let config = UiConfig::default();
        let observer: SharedObserver = Rc::new(ConsoleObserver);
        let storage = Storage::new(BrowserStore).with_observer(Rc::clone(&observer));
        Self {
            preferences: Preferences::new(storage, config.search.history_limit),
            preloader: Preloader::new(WebHost::new())
                .with_config(config.preload)
                .with_observer(observer),
            ui_components: prefetch_import("ui-components", UI_COMPONENTS_CHUNK),
            app_data: prefetch_import("app-data", APP_DATA_CHUNK),
            config,
        }
    }
}

#[function_component(OsintHubApp)]
fn osint_hub_app() -> Html {
    let services = use_memo(|_| Services::new(), ());
    let theme_mode = {
        let services = services.clone();
        use_state(move || services.preferences.load_theme())
    };
    let history = {
        let services = services.clone();
        use_state(move || services.preferences.load_search_history())
    };
    let favorites = {
        let services = services.clone();
        use_state(move || services.preferences.load_favorites())
    };
    let query = use_state(String::new);
    let view = use_state(|| View::Tools);

    {
        let services = services.clone();
        use_effect_with_deps(
            move |_| {
                services.preloader.on_idle(&services.app_data);
                services.preloader.after_delay(&services.ui_components, None);
                || ()
            },
            (),
        );
    }

    let is_dark = theme_mode.is_dark();
    let theme = create_theme(is_dark);

    let toggle_theme = {
        let services = services.clone();
        let theme_mode = theme_mode.clone();
        Callback::from(move |_: MouseEvent| {
            let next = theme_mode.toggle();
            services.preferences.persist_theme(next);
            theme_mode.set(next);
        })
    };

    let on_search = {
        let services = services.clone();
        let history = history.clone();
        let query = query.clone();
        Callback::from(move |value: String| {
            services.preferences.record_search(&value);
            history.set(services.preferences.load_search_history());
            query.set(value);
        })
    };

    let on_favorite = {
        let services = services.clone();
        let favorites = favorites.clone();
        let query = query.clone();
        Callback::from(move |_: MouseEvent| {
            let id = query.trim();
            if !id.is_empty() {
                services.preferences.toggle_favorite(id);
                favorites.set(services.preferences.load_favorites());
            }
        })
    };

    let select = |target: View| {
        let view = view.clone();
        Callback::from(move |_: MouseEvent| view.set(target))
    };
    let warm_components = services.preloader.on_hover(&services.ui_components);

    let entries: Vec<String> = match *view {
        View::Tools => Vec::new(),
        View::Favorites => (*favorites).clone(),
        View::History => (*history).clone(),
    };

    html! {
        <div class={classes!("min-h-screen", "flex", theme.bg, theme.text_main)}>
            <nav class={classes!("w-64", "p-4", "border-r", theme.sidebar)}>
                <NavButton
                    label="Tools"
                    active={*view == View::Tools}
                    {is_dark}
                    onclick={select(View::Tools)}
                />
                <NavButton
                    label="Favorites"
                    active={*view == View::Favorites}
                    {is_dark}
                    accent={AccentColor::Amber}
                    preload={Some(warm_components.clone())}
                    onclick={select(View::Favorites)}
                />
                <NavButton
                    label="Search history"
                    active={*view == View::History}
                    {is_dark}
                    accent={AccentColor::Cyan}
                    preload={Some(warm_components)}
                    onclick={select(View::History)}
                />
            </nav>
            <main class="flex-1">
                <header class={classes!("flex", "items-center", "gap-3", "p-4", "border-b", theme.header)}>
                    <SearchInput
                        class={classes!("flex-1", "rounded-xl", "border", "px-3", "py-2", theme.input)}
                        value={AttrValue::from((*query).clone())}
                        placeholder={AttrValue::Static("Search tools")}
                        aria_label={AttrValue::Static("Search tools")}
                        debounce_ms={services.config.search.debounce_ms}
                        {on_search}
                    />
                    <button type="button" class={ButtonVariants::icon(is_dark)} onclick={on_favorite}>
                        {"★"}
                    </button>
                    <button type="button" class={ButtonVariants::icon(is_dark)} onclick={toggle_theme}>
                        {if is_dark { "Light" } else { "Dark" }}
                    </button>
                </header>
                <section class={classes!("m-4", "p-4", "rounded-2xl", "border", theme.card)}>
                    if entries.is_empty() {
                        <p class={theme.text_sub}>{
                            if query.is_empty() { "Start typing to search".to_string() } else { format!("Results for \"{}\"", *query) }
                        }</p>
                    } else {
                        <ul>
                            { for entries.iter().map(|entry| html! { <li key={entry.clone()}>{entry.clone()}</li> }) }
                        </ul>
                    }
                </section>
            </main>
        </div>
    }
}

/// Entrypoint invoked by Trunk for wasm32 builds.
pub fn run_app() {
    console_error_panic_hook::set_once();
    if let Some(root) = gloo::utils::document().get_element_by_id("root") {
        yew::Renderer::<OsintHubApp>::with_root(root).render();
    } else {
        yew::Renderer::<OsintHubApp>::new().render();
    }
}
