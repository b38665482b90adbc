//! Alert banners for displaying success and error messages to users.

use maud::{Markup, html};

const SUCCESS_STYLE: &str = "p-4 mb-4 text-sm text-green-800 rounded-lg bg-green-50";
const ERROR_STYLE: &str = "p-4 mb-4 text-sm text-red-800 rounded-lg bg-red-50";

fn alert(style: &str, message: &str, details: &str) -> Markup {
    html! {
        div class=(style) role="alert"
        {
            p class="font-medium" { (message) }

            @if !details.is_empty()
            {
                p { (details) }
            }
        }
    }
}

/// A banner confirming that an action succeeded.
pub fn success_alert(message: &str) -> Markup {
    alert(SUCCESS_STYLE, message, "")
}

/// A banner explaining why an action failed.
pub fn error_alert(message: &str, details: &str) -> Markup {
    alert(ERROR_STYLE, message, details)
}
