use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use serde_json::json;
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;
use web_sys::{window, Element, HtmlElement, HtmlInputElement, HtmlTextAreaElement, MouseEvent};
use yew::prelude::*;

use crate::config::BehaviorConfig;
use crate::contact::{self, ContactField, ContactSubmission, FormNotice};
use crate::content::{self, NAV_ENTRIES, PROJECTS, SKILL_GROUPS};
use crate::dom::{self, AnimationFrames, RevealObserver};
use crate::logging::Logger;
use crate::menu::{self, MenuAction, MenuState};
use crate::reveal::{self, RevealAction, RevealBoard};
use crate::router;
use crate::schedule::Coalescer;
use crate::scroll::{self, ScrollView};
use crate::typing::Typewriter;

/// Page-lifetime settings shared by every handler. Built once at mount.
struct PageController {
    config: BehaviorConfig,
    logger: Logger,
    reduced_motion: bool,
}

impl PageController {
    fn load() -> Self {
        let reduced_motion = dom::prefers_reduced_motion();

        match dom::inline_config() {
            Some(Ok(config)) => Self::new(config, reduced_motion),
            Some(Err(error)) => {
                let controller = Self::new(BehaviorConfig::default(), reduced_motion);
                controller
                    .logger
                    .warn("config.invalid", json!({ "error": error.to_string() }));
                controller
            }
            None => Self::new(BehaviorConfig::default(), reduced_motion),
        }
    }

    fn new(config: BehaviorConfig, reduced_motion: bool) -> Self {
        Self {
            logger: Logger::new(config.log_level),
            config,
            reduced_motion,
        }
    }
}

impl Reducible for MenuState {
    type Action = MenuAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let next = self.apply(action);
        if next == *self {
            self
        } else {
            Rc::new(next)
        }
    }
}

impl Reducible for RevealBoard {
    type Action = RevealAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        if next.apply(action) {
            Rc::new(next)
        } else {
            self
        }
    }
}

fn scroll_to_section(href: &str, navbar_ref: &NodeRef, controller: &PageController) {
    let Some(id) = router::fragment_id(href) else {
        return;
    };

    let Some(section_top) = dom::section_top(id) else {
        controller
            .logger
            .debug("scroll.skipped_missing_target", json!({ "target": id }));
        return;
    };

    // Header height is read per click; it changes across breakpoints.
    let header_height = dom::element_height(navbar_ref.cast::<HtmlElement>().as_ref());
    dom::scroll_to(
        router::scroll_target(section_top, header_height),
        controller.reduced_motion,
    );
}

fn start_reveal_observer(
    controller: &PageController,
    dispatcher: UseReducerDispatcher<RevealBoard>,
) -> Option<RevealObserver> {
    let logger = controller.logger;
    let observer = RevealObserver::new(
        controller.config.reveal_threshold,
        &reveal::root_margin(controller.config.reveal_bottom_margin),
        move |reports| {
            let intersecting: Vec<&str> = reports
                .iter()
                .filter(|(_, intersecting)| *intersecting)
                .map(|(id, _)| id.as_str())
                .collect();
            if !intersecting.is_empty() {
                logger.debug("reveal.intersecting", json!({ "sections": intersecting }));
            }
            dispatcher.dispatch(RevealAction::Observe(reports));
        },
    );

    match observer {
        Ok(observer) => {
            observer.observe(content::section_ids());
            Some(observer)
        }
        Err(_) => {
            logger.warn("reveal.observer_unavailable", json!({}));
            None
        }
    }
}

fn timer_millis(delay: Duration) -> u32 {
    u32::try_from(delay.as_millis()).unwrap_or(u32::MAX)
}

/// Shows the next frame after `delay`, then reschedules itself until `alive`
/// is cleared or the writer runs dry.
fn schedule_typing(
    mut writer: Typewriter,
    alive: Rc<Cell<bool>>,
    role_text: UseStateHandle<AttrValue>,
    delay: Duration,
) {
    Timeout::new(timer_millis(delay), move || {
        if !alive.get() {
            return;
        }
        let Some(frame) = writer.next() else {
            return;
        };
        role_text.set(AttrValue::from(frame.text));
        schedule_typing(writer, alive, role_text, frame.delay);
    })
    .forget();
}

fn field_input(
    on_field: &Callback<(ContactField, String)>,
    field: ContactField,
) -> Callback<InputEvent> {
    let on_field = on_field.clone();
    Callback::from(move |event: InputEvent| {
        let value = event.target_unchecked_into::<HtmlInputElement>().value();
        on_field.emit((field, value));
    })
}

#[function_component(App)]
fn app() -> Html {
    let controller = use_memo((), |_| PageController::load());
    let menu = use_reducer_eq(MenuState::default);
    let reveal_board = use_reducer_eq(|| RevealBoard::with_sections(content::section_ids()));
    let scroll_view = use_state_eq(ScrollView::default);
    let contact_form = use_state(ContactSubmission::default);
    let notice = use_state(|| None::<FormNotice>);
    let role_text = use_state(|| AttrValue::from(content::HERO_ROLE));
    let navbar_ref = use_node_ref();
    let menu_ref = use_node_ref();
    let toggle_ref = use_node_ref();

    {
        let controller = controller.clone();
        let navbar_ref = navbar_ref.clone();
        let scroll_view = scroll_view.clone();
        let reveal_dispatcher = reveal_board.dispatcher();
        use_effect_with((), move |_| {
            let observer = if controller.reduced_motion {
                reveal_dispatcher.dispatch(RevealAction::RevealAll);
                None
            } else {
                start_reveal_observer(&controller, reveal_dispatcher.clone())
            };
            let viewport_fallback = !controller.reduced_motion && observer.is_none();

            let evaluate = {
                let controller = controller.clone();
                move || {
                    let config = &controller.config;
                    let header = navbar_ref.cast::<HtmlElement>();
                    let sample = dom::sample(header.as_ref());
                    let sections = dom::measure_sections(content::section_ids());
                    scroll_view.set(scroll::evaluate(&sample, &sections, config));

                    if viewport_fallback {
                        let reports = reveal::sections_in_view(
                            &sections,
                            &sample,
                            config.reveal_threshold,
                            config.reveal_bottom_margin,
                        )
                        .into_iter()
                        .map(|id| (id.to_string(), true))
                        .collect();
                        reveal_dispatcher.dispatch(RevealAction::Observe(reports));
                    }
                }
            };

            let coalescer = Rc::new(Coalescer::new(AnimationFrames, evaluate));
            coalescer.run_now();

            let listener = window().map(|win| {
                let coalescer = Rc::clone(&coalescer);
                EventListener::new(&win, "scroll", move |_| {
                    coalescer.request();
                })
            });

            controller.logger.info(
                "behavior.initialized",
                json!({
                    "sections": NAV_ENTRIES.len(),
                    "reduced_motion": controller.reduced_motion,
                    "reveal_fallback": viewport_fallback,
                }),
            );

            move || {
                drop(listener);
                coalescer.cancel();
                drop(observer);
            }
        });
    }

    {
        let menu_dispatcher = menu.dispatcher();
        let menu_ref = menu_ref.clone();
        let toggle_ref = toggle_ref.clone();
        use_effect_with((), move |_| {
            let listener = window().and_then(|w| w.document()).map(|document| {
                EventListener::new(&document, "click", move |event| {
                    let inside_menu =
                        dom::contains_target(menu_ref.cast::<Element>().as_ref(), event.target());
                    let inside_toggle =
                        dom::contains_target(toggle_ref.cast::<Element>().as_ref(), event.target());
                    if menu::click_closes_menu(inside_menu, inside_toggle) {
                        menu_dispatcher.dispatch(MenuAction::Close);
                    }
                })
            });
            move || drop(listener)
        });
    }

    {
        let controller = controller.clone();
        let role_text = role_text.clone();
        use_effect_with((), move |_| {
            let alive = Rc::new(Cell::new(true));
            let typing = &controller.config.typing;
            if typing.enabled {
                controller
                    .logger
                    .info("typing.started", json!({ "roles": typing.roles.len() }));
                schedule_typing(
                    Typewriter::from_config(typing),
                    Rc::clone(&alive),
                    role_text,
                    Duration::ZERO,
                );
            }
            move || alive.set(false)
        });
    }

    let on_toggle = {
        let menu = menu.clone();
        let logger = controller.logger;
        Callback::from(move |_: MouseEvent| {
            logger.debug("menu.toggled", json!({ "open": !menu.is_open() }));
            menu.dispatch(MenuAction::Toggle);
        })
    };

    let on_nav = {
        let menu_dispatcher = menu.dispatcher();
        let navbar_ref = navbar_ref.clone();
        let controller = controller.clone();
        Callback::from(move |(event, href): (MouseEvent, String)| {
            event.prevent_default();
            menu_dispatcher.dispatch(MenuAction::Close);
            scroll_to_section(&href, &navbar_ref, &controller);
        })
    };

    let nav_click = |href: String| {
        let on_nav = on_nav.clone();
        Callback::from(move |event: MouseEvent| on_nav.emit((event, href.clone())))
    };

    let on_scroll_top = {
        let reduced_motion = controller.reduced_motion;
        Callback::from(move |_: MouseEvent| dom::scroll_to(router::TOP_OF_PAGE, reduced_motion))
    };

    let on_field = {
        let contact_form = contact_form.clone();
        Callback::from(move |(field, value): (ContactField, String)| {
            let mut next = (*contact_form).clone();
            next.set(field, value);
            contact_form.set(next);
        })
    };

    let on_message_input = {
        let on_field = on_field.clone();
        Callback::from(move |event: InputEvent| {
            let value = event.target_unchecked_into::<HtmlTextAreaElement>().value();
            on_field.emit((ContactField::Message, value));
        })
    };

    let on_submit = {
        let contact_form = contact_form.clone();
        let notice = notice.clone();
        let logger = controller.logger;
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();

            let mut form = (*contact_form).clone();
            let result = contact::submit(&mut form);
            match &result {
                Ok(_) => logger.info("contact.accepted", json!({})),
                Err(error) => logger.info("contact.rejected", json!({ "reason": error.kind() })),
            }

            contact_form.set(form);
            notice.set(Some(FormNotice::from_result(result)));
        })
    };

    let section_class = |id: &'static str| {
        classes!(
            "section",
            id,
            reveal::CANDIDATE_CLASS,
            reveal_board.class_for(id)
        )
    };

    let form_notice = match &*notice {
        Some(notice) => html! {
            <p class={notice.class()} role="status">{notice.text()}</p>
        },
        None => html! {},
    };

    html! {
        <>
            <header
                id="navbar"
                class="navbar"
                ref={navbar_ref}
                style={scroll_view.header_shadow.style()}
            >
                <nav class="nav-container" aria-label="Primary">
                    <a class="nav-logo" href="#hero" onclick={nav_click("#hero".to_string())}>
                        {content::SITE_OWNER}
                    </a>
                    <ul
                        id="nav-menu"
                        class={classes!("nav-menu", menu.container_class())}
                        ref={menu_ref}
                    >
                        { for NAV_ENTRIES.iter().map(|entry| {
                            let active = scroll_view.is_active(entry.section);
                            html! {
                                <li class="nav-item" key={entry.section}>
                                    <a
                                        class={classes!("nav-link", active.then_some("active"))}
                                        href={entry.href()}
                                        aria-current={active.then_some("true")}
                                        onclick={nav_click(entry.href())}
                                    >
                                        {entry.label}
                                    </a>
                                </li>
                            }
                        }) }
                    </ul>
                    <button
                        id="nav-toggle"
                        class="nav-toggle"
                        type="button"
                        ref={toggle_ref}
                        aria-controls="nav-menu"
                        aria-expanded={menu.is_open().to_string()}
                        aria-label={menu.toggle_label()}
                        onclick={on_toggle}
                    >
                        <i class={classes!("fas", menu.icon())} aria-hidden="true"></i>
                    </button>
                </nav>
            </header>

            <main>
                <section id="hero" class={section_class("hero")}>
                    <div class="hero-content">
                        <p class="hero-greeting">{"Hi, I'm"}</p>
                        <h1 class="hero-name">{content::SITE_OWNER}</h1>
                        <p class="hero-role" aria-live="polite">{(*role_text).clone()}</p>
                        <p class="hero-blurb">{content::HERO_BLURB}</p>
                        <div class="hero-actions">
                            <a class="btn btn-primary" href="#projects" onclick={nav_click("#projects".to_string())}>
                                {"View Projects"}
                            </a>
                            <a class="btn btn-secondary" href="#contact" onclick={nav_click("#contact".to_string())}>
                                {"Contact Me"}
                            </a>
                        </div>
                    </div>
                </section>

                <section id="about" class={section_class("about")}>
                    <h2 class="section-title">{"About Me"}</h2>
                    { for content::ABOUT_PARAGRAPHS.iter().map(|paragraph| html! {
                        <p class="about-text">{*paragraph}</p>
                    }) }
                </section>

                <section id="skills" class={section_class("skills")}>
                    <h2 class="section-title">{"Skills"}</h2>
                    <div class="skills-grid">
                        { for SKILL_GROUPS.iter().map(|group| html! {
                            <div class="skill-card" key={group.title}>
                                <i class={classes!("fas", group.icon)} aria-hidden="true"></i>
                                <h3>{group.title}</h3>
                                <ul class="skill-list">
                                    { for group.items.iter().map(|item| html! { <li>{*item}</li> }) }
                                </ul>
                            </div>
                        }) }
                    </div>
                </section>

                <section id="projects" class={section_class("projects")}>
                    <h2 class="section-title">{"Projects"}</h2>
                    <div class="projects-grid">
                        { for PROJECTS.iter().map(|project| html! {
                            <article class="project-card" key={project.title}>
                                <h3>{project.title}</h3>
                                <p>{project.summary}</p>
                                <ul class="project-stack">
                                    { for project.stack.iter().map(|tech| html! { <li>{*tech}</li> }) }
                                </ul>
                                <a
                                    class="project-link"
                                    href={project.href}
                                    target="_blank"
                                    rel="noopener noreferrer"
                                >
                                    {"Source"}
                                    <span class="sr-only">{" (opens in a new tab)"}</span>
                                </a>
                            </article>
                        }) }
                    </div>
                </section>

                <section id="contact" class={section_class("contact")}>
                    <h2 class="section-title">{"Get In Touch"}</h2>
                    <p class="contact-intro">
                        {"Have a question or a project in mind? Write to "}
                        <a href={format!("mailto:{}", content::CONTACT_EMAIL)}>{content::CONTACT_EMAIL}</a>
                        {" or use the form below."}
                    </p>
                    <form id="contact-form" class="contact-form" novalidate={true} onsubmit={on_submit}>
                        <div class="form-row">
                            <input
                                type="text"
                                name={ContactField::Name.as_str()}
                                placeholder="Your Name"
                                value={contact_form.name.clone()}
                                oninput={field_input(&on_field, ContactField::Name)}
                            />
                            <input
                                type="email"
                                name={ContactField::Email.as_str()}
                                placeholder="Your Email"
                                value={contact_form.email.clone()}
                                oninput={field_input(&on_field, ContactField::Email)}
                            />
                        </div>
                        <input
                            type="text"
                            name={ContactField::Subject.as_str()}
                            placeholder="Subject"
                            value={contact_form.subject.clone()}
                            oninput={field_input(&on_field, ContactField::Subject)}
                        />
                        <textarea
                            name={ContactField::Message.as_str()}
                            rows="6"
                            placeholder="Your Message"
                            value={contact_form.message.clone()}
                            oninput={on_message_input}
                        />
                        <button class="btn btn-primary" type="submit">{"Send Message"}</button>
                        {form_notice}
                    </form>
                </section>
            </main>

            <footer class="footer">
                <p>{format!("© {} · Built with Rust and Yew", content::SITE_OWNER)}</p>
            </footer>

            <button
                id="scroll-top"
                class={classes!("scroll-top", scroll_view.scroll_top_visible.then_some("visible"))}
                type="button"
                aria-label="Scroll to top"
                onclick={on_scroll_top}
            >
                <i class="fas fa-arrow-up" aria-hidden="true"></i>
            </button>
        </>
    }
}

pub fn run() {
    console_error_panic_hook::set_once();

    yew::Renderer::<App>::with_root(
        window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("app"))
            .expect("missing #app mount point"),
    )
    .render();
}
