use dioxus::prelude::*;

#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Secondary,
    Ghost,
}

impl ButtonVariant {
    fn class(self) -> &'static str {
        match self {
            ButtonVariant::Primary => "bg-amber-500 text-slate-950 hover:bg-amber-400 focus:ring-amber-500",
            ButtonVariant::Secondary => "bg-slate-700 text-slate-100 hover:bg-slate-600 focus:ring-slate-500",
            ButtonVariant::Ghost => "bg-transparent text-slate-300 hover:bg-slate-800 hover:text-white focus:ring-slate-600",
        }
    }
}

#[derive(Props, Clone, PartialEq)]
pub struct ButtonProps {
    #[props(optional)]
    pub class: Option<String>,
    #[props(optional)]
    pub variant: Option<ButtonVariant>,
    #[props(optional)]
    pub r#type: Option<String>,
    #[props(optional)]
    pub disabled: Option<bool>,
    /// Shows a spinner and blocks clicks.
    #[props(optional)]
    pub busy: Option<bool>,
    #[props(optional)]
    pub onclick: Option<EventHandler<MouseEvent>>,
    pub children: Element,
}

#[component]
pub fn Button(props: ButtonProps) -> Element {
    let variant = props.variant.unwrap_or_default();
    let busy = props.busy.unwrap_or(false);
    let disabled = props.disabled.unwrap_or(false) || busy;

    let base = "inline-flex items-center justify-center gap-2 rounded-md px-4 py-2 text-sm font-semibold transition-colors focus:outline-none focus:ring-2 focus:ring-offset-2 focus:ring-offset-slate-900 disabled:opacity-50 disabled:pointer-events-none";

    let class = match props.class {
        Some(extra) if !extra.is_empty() => format!("{} {} {}", base, variant.class(), extra),
        _ => format!("{} {}", base, variant.class()),
    };

    rsx! {
        button {
            class,
            r#type: props.r#type.unwrap_or_else(|| "button".to_string()),
            disabled,
            onclick: move |evt| {
                if disabled {
                    return;
                }
                if let Some(handler) = &props.onclick {
                    handler.call(evt);
                }
            },
            if busy {
                span { class: "loading loading-spinner loading-xs" }
            }
            {props.children}
        }
    }
}
