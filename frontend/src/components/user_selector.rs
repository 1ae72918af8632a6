use yew::prelude::*;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use shared::User;

#[derive(Properties, PartialEq)]
pub struct UserSelectorProps {
    pub users: Vec<User>,
    pub selected_user_id: Option<String>,
    #[prop_or_default]
    pub error: Option<String>,
    pub on_select: Callback<String>,
    pub on_create: Callback<String>,
    pub on_clear: Callback<()>,
}

#[function_component(UserSelector)]
pub fn user_selector(props: &UserSelectorProps) -> Html {
    let new_name = use_state(String::new);

    let on_select_change = {
        let on_select = props.on_select.clone();
        let on_clear = props.on_clear.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let value = select.value();
            if value.is_empty() {
                on_clear.emit(());
            } else {
                on_select.emit(value);
            }
        })
    };

    let on_name_input = {
        let new_name = new_name.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            new_name.set(input.value());
        })
    };

    let on_create_submit = {
        let new_name = new_name.clone();
        let on_create = props.on_create.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_create.emit((*new_name).clone());
            new_name.set(String::new());
        })
    };

    let on_clear_click = {
        let on_clear = props.on_clear.clone();
        Callback::from(move |_: MouseEvent| on_clear.emit(()))
    };

    let selected = props.selected_user_id.clone().unwrap_or_default();

    html! {
        <section class="user-selector">
            {if let Some(error) = props.error.as_ref() {
                html! { <div class="form-message error">{error}</div> }
            } else { html! {} }}

            <div class="form-group">
                <label for="user-select">{"User"}</label>
                <select id="user-select" onchange={on_select_change}>
                    <option value="" selected={selected.is_empty()}>{"Select a user..."}</option>
                    {for props.users.iter().map(|user| html! {
                        <option value={user.id.clone()} selected={user.id == selected}>{&user.name}</option>
                    })}
                </select>
                {if selected.is_empty() {
                    html! {}
                } else {
                    html! { <button class="btn btn-small" onclick={on_clear_click}>{"Switch user"}</button> }
                }}
            </div>

            <form class="create-user-form" onsubmit={on_create_submit}>
                <input
                    type="text"
                    placeholder="New user name"
                    value={(*new_name).clone()}
                    oninput={on_name_input}
                />
                <button type="submit" class="btn btn-secondary">{"Add User"}</button>
            </form>
        </section>
    }
}
