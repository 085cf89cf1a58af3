use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct CardProps {
    #[props(optional)]
    pub class: Option<String>,
    pub children: Element,
}

#[component]
pub fn Card(props: CardProps) -> Element {
    let base = "rounded-lg border border-slate-800 bg-slate-900 shadow";
    let class = match props.class {
        Some(extra) if !extra.is_empty() => format!("{} {}", base, extra),
        _ => base.to_string(),
    };

    rsx! {
        section { class, {props.children} }
    }
}

#[derive(Props, Clone, PartialEq)]
pub struct CardHeaderProps {
    pub title: String,
    #[props(optional)]
    pub subtitle: Option<String>,
    /// Controls rendered on the right of the title (refresh, filters).
    #[props(optional)]
    pub actions: Option<Element>,
}

#[component]
pub fn CardHeader(props: CardHeaderProps) -> Element {
    rsx! {
        header { class: "flex items-start justify-between gap-4 border-b border-slate-800 px-5 py-3",
            div {
                h2 { class: "text-base font-semibold text-slate-100", "{props.title}" }
                if let Some(sub) = &props.subtitle {
                    p { class: "mt-0.5 text-xs text-slate-400", "{sub}" }
                }
            }
            if let Some(actions) = props.actions {
                div { class: "flex items-center gap-2", {actions} }
            }
        }
    }
}

#[derive(Props, Clone, PartialEq)]
pub struct CardBodyProps {
    #[props(optional)]
    pub class: Option<String>,
    pub children: Element,
}

#[component]
pub fn CardBody(props: CardBodyProps) -> Element {
    let class = format!("px-5 py-4 {}", props.class.unwrap_or_default());
    rsx! {
        div { class, {props.children} }
    }
}
