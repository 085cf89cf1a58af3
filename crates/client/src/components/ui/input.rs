use dioxus::prelude::*;

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum InputType {
    Text,
    Password,
    Date,
}

impl InputType {
    fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Password => "password",
            Self::Date => "date",
        }
    }
}

#[derive(Props, Clone, PartialEq)]
pub struct TextInputProps {
    #[props(optional)]
    pub class: Option<String>,
    #[props(optional)]
    pub label: Option<String>,
    pub value: String,
    pub oninput: EventHandler<FormEvent>,
    #[props(optional)]
    pub placeholder: Option<String>,
    #[props(optional)]
    pub input_type: Option<InputType>,
    #[props(optional)]
    pub autocomplete: Option<String>,
}

#[component]
pub fn TextInput(props: TextInputProps) -> Element {
    let base = "w-full rounded-md bg-slate-950 text-slate-100 px-3 py-2 text-sm border border-slate-700 placeholder-slate-500 focus:outline-none focus:ring-2 focus:ring-amber-500/50 focus:border-amber-500";
    let class = match props.class {
        Some(extra) if !extra.is_empty() => format!("{} {}", base, extra),
        _ => base.to_string(),
    };

    let input = rsx! {
        input {
            class,
            r#type: props.input_type.unwrap_or(InputType::Text).as_str(),
            value: "{props.value}",
            placeholder: props.placeholder.unwrap_or_default(),
            autocomplete: props.autocomplete.unwrap_or_else(|| "off".to_string()),
            oninput: move |e| props.oninput.call(e),
        }
    };

    match props.label {
        Some(label) => rsx! {
            label { class: "flex flex-col gap-1 text-xs font-medium text-slate-400",
                "{label}"
                {input}
            }
        },
        None => input,
    }
}
