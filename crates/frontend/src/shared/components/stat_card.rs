use crate::shared::icons::icon;
use leptos::prelude::*;

/// Как форматировать значение карточки
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValueFormat {
    Integer,
    Number { decimals: u8 },
    Percent { decimals: u8 },
}

pub fn format_value(val: f64, fmt: ValueFormat) -> String {
    match fmt {
        ValueFormat::Integer => format!("{:.0}", val),
        ValueFormat::Number { decimals } => format!("{:.prec$}", val, prec = decimals as usize),
        ValueFormat::Percent { decimals } => format!("{:.prec$}%", val, prec = decimals as usize),
    }
}

#[component]
pub fn StatCard(
    /// Label displayed above the value
    #[prop(into)]
    label: String,
    /// Icon name from the icon() helper
    #[prop(into)]
    icon_name: String,
    /// Primary numeric value (None = no data)
    #[prop(into)]
    value: Signal<Option<f64>>,
    /// How to format the value
    format: ValueFormat,
    /// Change relative to previous period, in value units
    #[prop(into, optional)]
    change: Signal<Option<f64>>,
    /// Optional subtitle below the value
    #[prop(into, optional)]
    subtitle: Signal<Option<String>>,
) -> impl IntoView {
    let formatted = move || match value.get() {
        Some(v) => format_value(v, format),
        None => "n/a".to_string(),
    };

    let change_view = move || {
        change.get().map(|delta| {
            let (arrow, cls) = if delta > 0.0 {
                ("\u{2191}", "stat-card__change stat-card__change--up")
            } else if delta < 0.0 {
                ("\u{2193}", "stat-card__change stat-card__change--down")
            } else {
                ("", "stat-card__change stat-card__change--flat")
            };
            let text = format!("{}{:.2}", arrow, delta.abs());
            view! { <span class=cls>{text}</span> }
        })
    };

    let subtitle_view = move || {
        subtitle.get().map(|s| {
            view! { <div class="stat-card__subtitle">{s}</div> }
        })
    };

    view! {
        <div class="stat-card">
            <div class="stat-card__icon">
                {icon(&icon_name)}
            </div>
            <div class="stat-card__content">
                <div class="stat-card__label">{label}</div>
                <div class="stat-card__value">
                    {formatted}
                    {change_view}
                </div>
                {subtitle_view}
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(12.0, ValueFormat::Integer), "12");
        assert_eq!(format_value(3.456, ValueFormat::Number { decimals: 2 }), "3.46");
        assert_eq!(format_value(50.0, ValueFormat::Percent { decimals: 1 }), "50.0%");
    }
}
