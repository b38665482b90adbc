//! Application router configuration with protected and unprotected route definitions.

use axum::{
    Router, middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use maud::html;
use tower_http::services::ServeDir;

use crate::{
    AppState,
    add_expense::{get_add_expense_page, post_add_expense},
    auth_middleware::auth_guard,
    delete_expense::post_delete_expense,
    endpoints,
    expense_chart::get_expense_chart,
    expenses::get_expenses_page,
    home::get_home_page,
    html::{LINK_STYLE, PAGE_CONTAINER_STYLE, base},
    log_in::{get_log_in_page, post_log_in},
    log_out::get_log_out,
    logging::logging_middleware,
    not_found::get_404_not_found,
    register::{get_register_page, post_register},
    stores::{CredentialStore, ExpenseStore, UserStore},
};

/// Return a router with all the app's routes.
pub fn build_router<C, U, E>(state: AppState<C, U, E>) -> Router
where
    C: CredentialStore + Clone + Send + Sync + 'static,
    U: UserStore + Clone + Send + Sync + 'static,
    E: ExpenseStore + Clone + Send + Sync + 'static,
{
    let unprotected_routes = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(
            endpoints::REGISTER_VIEW,
            get(get_register_page).post(post_register),
        )
        .route(endpoints::LOG_IN_VIEW, get(get_log_in_page).post(post_log_in))
        .route(endpoints::LOG_OUT, get(get_log_out));

    let protected_routes = Router::new()
        .route(endpoints::HOME_VIEW, get(get_home_page))
        .route(
            endpoints::ADD_EXPENSE_VIEW,
            get(get_add_expense_page).post(post_add_expense),
        )
        .route(endpoints::EXPENSES_VIEW, get(get_expenses_page))
        .route(endpoints::EXPENSE_CHART, get(get_expense_chart))
        .route(endpoints::DELETE_EXPENSE, post(post_delete_expense))
        .layer(middleware::from_fn_with_state(state.clone(), auth_guard));

    protected_routes
        .merge(unprotected_routes)
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .layer(middleware::from_fn(logging_middleware))
        .with_state(state)
}

/// Display the landing page, which links to the registration and log in pages.
async fn get_index_page() -> Response {
    let content = html! {
        div class=(PAGE_CONTAINER_STYLE)
        {
            h1 class="text-2xl font-bold mb-4" { "Outlay" }

            p class="mb-4" { "Track your day-to-day spending." }

            ul class="space-y-2"
            {
                li { a href=(endpoints::REGISTER_VIEW) class=(LINK_STYLE) { "Create an account" } }
                li { a href=(endpoints::LOG_IN_VIEW) class=(LINK_STYLE) { "Log in" } }
            }
        }
    };

    base("Outlay", &content).into_response()
}
