use crate::{
    auth::session::Authenticated,
    error::AppError,
    model::employee::{Employee, EmployeeDraft},
    state::AppState,
    store::pipeline::{EmployeeFilter, GenderFilter, Page, StatusFilter, filter_employees, paginate},
};
use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EmployeeQuery {
    /// Page number, 1-based
    pub page: Option<usize>,
    /// Items per page, defaults to the dashboard page size
    pub per_page: Option<usize>,
    /// Search by first and last name
    pub search: Option<String>,
    pub gender: Option<GenderFilter>,
    pub status: Option<StatusFilter>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    #[schema(example = "1002")]
    pub id: String,
    #[schema(example = false)]
    pub is_active: bool,
}

/// Create Employee
#[utoipa::path(
    post,
    path = "/api/employees",
    request_body = EmployeeDraft,
    responses(
        (status = 201, description = "Employee created", body = Employee),
        (status = 400, description = "Form validation failed", body = Object, example = json!({
            "errors": { "email": "Invalid email format" }
        })),
        (status = 401, description = "Not logged in")
    ),
    tag = "Employee"
)]
pub async fn create_employee(
    user: Authenticated,
    state: web::Data<AppState>,
    payload: web::Json<EmployeeDraft>,
) -> Result<HttpResponse, AppError> {
    let fields = payload
        .validate(state.max_photo_bytes)
        .map_err(AppError::Validation)?;

    let mut records = state.records_mut();
    let employee = records.create(fields);
    info!(id = %employee.id, actor = %user.email, total = records.len(), "Employee created");

    Ok(HttpResponse::Created().json(employee))
}

/// List Employees
#[utoipa::path(
    get,
    path = "/api/employees",
    params(EmployeeQuery),
    responses(
        (status = 200, description = "Filtered page of employees, newest first", body = Page),
        (status = 401, description = "Not logged in")
    ),
    tag = "Employee"
)]
pub async fn list_employees(
    state: web::Data<AppState>,
    query: web::Query<EmployeeQuery>,
) -> Result<HttpResponse, AppError> {
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(state.page_size).clamp(1, 100);

    let filter = EmployeeFilter {
        search: query.search.clone().unwrap_or_default(),
        gender: query.gender.unwrap_or_default(),
        status: query.status.unwrap_or_default(),
    };
    debug!(filter = ?filter, page, per_page, "Listing employees");

    let records = state.records();
    let matches: Vec<Employee> = filter_employees(records.all(), &filter)
        .into_iter()
        .cloned()
        .collect();

    Ok(HttpResponse::Ok().json(paginate(&matches, page, per_page)))
}

/// Get Employee by ID
#[utoipa::path(
    get,
    path = "/api/employees/{employee_id}",
    params(
        ("employee_id", Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee found", body = Employee),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "Employee not found"
        }))
    ),
    tag = "Employee"
)]
pub async fn get_employee(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let employee_id = path.into_inner();

    let records = state.records();
    match records.get(&employee_id) {
        Some(emp) => Ok(HttpResponse::Ok().json(emp)),
        None => Err(AppError::NotFound("Employee")),
    }
}

/// Update Employee
///
/// Replaces every field of the record; the id is kept.
#[utoipa::path(
    put,
    path = "/api/employees/{employee_id}",
    params(
        ("employee_id", Path, description = "Employee ID")
    ),
    request_body = EmployeeDraft,
    responses(
        (status = 200, description = "Employee updated", body = Employee),
        (status = 400, description = "Form validation failed"),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "Employee not found"
        }))
    ),
    tag = "Employee"
)]
pub async fn update_employee(
    user: Authenticated,
    state: web::Data<AppState>,
    path: web::Path<String>,
    payload: web::Json<EmployeeDraft>,
) -> Result<HttpResponse, AppError> {
    let employee_id = path.into_inner();
    let fields = payload
        .validate(state.max_photo_bytes)
        .map_err(AppError::Validation)?;

    let employee = Employee::from_fields(employee_id, fields);
    if !state.records_mut().update(employee.clone()) {
        return Err(AppError::NotFound("Employee"));
    }

    info!(id = %employee.id, actor = %user.email, "Employee edited");
    Ok(HttpResponse::Ok().json(employee))
}

/// Delete Employee
#[utoipa::path(
    delete,
    path = "/api/employees/{employee_id}",
    params(
        ("employee_id", Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Successfully deleted", body = Object, example = json!({
            "message": "Successfully deleted"
        })),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "Employee not found"
        }))
    ),
    tag = "Employee"
)]
pub async fn delete_employee(
    user: Authenticated,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let employee_id = path.into_inner();

    let removed = state.records_mut().delete(&employee_id);
    if removed == 0 {
        return Err(AppError::NotFound("Employee"));
    }

    info!(id = %employee_id, actor = %user.email, "Employee removed");
    Ok(HttpResponse::Ok().json(json!({
        "message": "Successfully deleted"
    })))
}

/// Toggle Employee status
#[utoipa::path(
    patch,
    path = "/api/employees/{employee_id}/status",
    params(
        ("employee_id", Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Active flag flipped", body = StatusResponse),
        (status = 404, description = "Employee not found")
    ),
    tag = "Employee"
)]
pub async fn toggle_status(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    let is_active = state
        .records_mut()
        .toggle_status(&id)
        .ok_or(AppError::NotFound("Employee"))?;

    Ok(HttpResponse::Ok().json(StatusResponse { id, is_active }))
}
