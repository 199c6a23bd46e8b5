use crate::api::dashboard::{ListViewResponse, PageRequest};
use crate::api::employee::StatusResponse;
use crate::model::employee::{Employee, EmployeeDraft};
use crate::model::region::{Gender, Region};
use crate::model::session::{LoginReqDto, SessionResponse, SessionUser};
use crate::store::pipeline::{EmployeeFilter, GenderFilter, Page, StatusFilter};
use crate::store::records::EmployeeStats;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Staff Directory API",
        version = "0.1.0",
        description = r#"
## Staff Directory

A small employee directory: sign in, then create, edit, deactivate, search and
page through employee records.

### Session
Signing in accepts **any** non-empty email and password. It is a gate for the
dashboard, not authentication. There is one session per running server.

### Storage
The whole collection is kept in memory and rewritten to a JSON file after
every change. A missing or corrupt file is replaced by three sample records.

### Listing
- `GET /api/employees` is stateless: filter and page come from the query.
- `/api/dashboard/list*` keeps the table's filter and current page on the
  server. Changing the filter returns to page 1; asking for a page outside
  the available range leaves the page unchanged.
"#,
    ),
    paths(
        crate::auth::handlers::login,
        crate::auth::handlers::logout,
        crate::auth::handlers::current_session,

        crate::api::employee::create_employee,
        crate::api::employee::list_employees,
        crate::api::employee::get_employee,
        crate::api::employee::update_employee,
        crate::api::employee::delete_employee,
        crate::api::employee::toggle_status,

        crate::api::dashboard::stats,
        crate::api::dashboard::current_list,
        crate::api::dashboard::set_filter,
        crate::api::dashboard::set_page
    ),
    components(
        schemas(
            Employee,
            EmployeeDraft,
            Gender,
            Region,
            LoginReqDto,
            SessionUser,
            SessionResponse,
            EmployeeFilter,
            GenderFilter,
            StatusFilter,
            Page,
            EmployeeStats,
            StatusResponse,
            ListViewResponse,
            PageRequest
        )
    ),
    tags(
        (name = "Session", description = "Login gate"),
        (name = "Employee", description = "Employee record APIs"),
        (name = "Dashboard", description = "Statistics and the paged employee table"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();

        for expected in [
            "/auth/login",
            "/auth/session",
            "/api/employees",
            "/api/employees/{employee_id}",
            "/api/employees/{employee_id}/status",
            "/api/dashboard/list/page",
        ] {
            assert!(paths.contains(&expected), "missing {expected}");
        }
    }
}
