use yew::prelude::*;
use web_sys::HtmlSelectElement;
use shared::{month_name, selectable_years, MonthKey};

#[derive(Properties, PartialEq)]
pub struct MonthPickerProps {
    pub id_prefix: AttrValue,
    pub value: MonthKey,
    pub on_change: Callback<MonthKey>,
    #[prop_or_default]
    pub disabled: bool,
}

/// Month and year selects producing a `MonthKey`
#[function_component(MonthPicker)]
pub fn month_picker(props: &MonthPickerProps) -> Html {
    let value = props.value;

    let on_month_change = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let month = select.value().parse::<u32>().ok();
            if let Some(key) = month.and_then(|m| MonthKey::new(value.year(), m).ok()) {
                on_change.emit(key);
            }
        })
    };

    let on_year_change = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let year = select.value().parse::<i32>().ok();
            if let Some(key) = year.and_then(|y| MonthKey::new(y, value.month()).ok()) {
                on_change.emit(key);
            }
        })
    };

    let month_id = format!("{}-month", props.id_prefix);
    let year_id = format!("{}-year", props.id_prefix);

    html! {
        <div class="month-picker">
            <div class="form-group">
                <label for={month_id.clone()}>{"Month"}</label>
                <select id={month_id} onchange={on_month_change} disabled={props.disabled}>
                    {for (1..=12u32).map(|m| html! {
                        <option value={m.to_string()} selected={m == value.month()}>{month_name(m)}</option>
                    })}
                </select>
            </div>
            <div class="form-group">
                <label for={year_id.clone()}>{"Year"}</label>
                <select id={year_id} onchange={on_year_change} disabled={props.disabled}>
                    {for selectable_years(MonthKey::current().year()).into_iter().map(|y| html! {
                        <option value={y.to_string()} selected={y == value.year()}>{y}</option>
                    })}
                </select>
            </div>
        </div>
    }
}
