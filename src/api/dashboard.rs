use crate::{
    state::AppState,
    store::{
        pipeline::{EmployeeFilter, Page},
        records::EmployeeStats,
    },
};
use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct ListViewResponse {
    pub filter: EmployeeFilter,
    pub page: Page,
}

#[derive(Deserialize, ToSchema)]
pub struct PageRequest {
    #[schema(example = 2)]
    pub page: usize,
}

fn render_view(state: &AppState) -> ListViewResponse {
    let records = state.records();
    let view = state.list_view();
    ListViewResponse {
        filter: view.filter().clone(),
        page: view.render(records.all()),
    }
}

/// Dashboard statistics
#[utoipa::path(
    get,
    path = "/api/dashboard/stats",
    responses(
        (status = 200, description = "Total, active and inactive counts", body = EmployeeStats),
        (status = 401, description = "Not logged in")
    ),
    tag = "Dashboard"
)]
pub async fn stats(state: web::Data<AppState>) -> impl Responder {
    let stats = state.records().stats();
    HttpResponse::Ok().json(stats)
}

/// Current list view
#[utoipa::path(
    get,
    path = "/api/dashboard/list",
    responses(
        (status = 200, description = "Current filter and page of the employee table", body = ListViewResponse),
        (status = 401, description = "Not logged in")
    ),
    tag = "Dashboard"
)]
pub async fn current_list(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(render_view(&state))
}

/// Change list filters
///
/// Always returns to page 1.
#[utoipa::path(
    put,
    path = "/api/dashboard/list/filter",
    request_body = EmployeeFilter,
    responses(
        (status = 200, description = "Filtered list, first page", body = ListViewResponse),
        (status = 401, description = "Not logged in")
    ),
    tag = "Dashboard"
)]
pub async fn set_filter(
    state: web::Data<AppState>,
    body: web::Json<EmployeeFilter>,
) -> impl Responder {
    let filter = body.into_inner();
    debug!(filter = ?filter, "List filter changed");
    state.list_view_mut().set_filter(filter);

    HttpResponse::Ok().json(render_view(&state))
}

/// Change list page
///
/// Pages outside the available range leave the current page as it was.
#[utoipa::path(
    put,
    path = "/api/dashboard/list/page",
    request_body = PageRequest,
    responses(
        (status = 200, description = "List at the requested (or unchanged) page", body = ListViewResponse),
        (status = 401, description = "Not logged in")
    ),
    tag = "Dashboard"
)]
pub async fn set_page(state: web::Data<AppState>, body: web::Json<PageRequest>) -> impl Responder {
    {
        let records = state.records();
        let mut view = state.list_view_mut();
        if !view.go_to(body.page, records.all()) {
            debug!(
                page = body.page,
                current = view.current_page(),
                "Requested page out of range, ignored"
            );
        }
    }

    HttpResponse::Ok().json(render_view(&state))
}
