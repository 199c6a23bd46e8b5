use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::employee::Employee;
use crate::model::region::Gender;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum GenderFilter {
    #[default]
    All,
    Male,
    Female,
    Other,
}

impl GenderFilter {
    fn matches(self, gender: Gender) -> bool {
        match self {
            GenderFilter::All => true,
            GenderFilter::Male => gender == Gender::Male,
            GenderFilter::Female => gender == Gender::Female,
            GenderFilter::Other => gender == Gender::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Inactive,
}

impl StatusFilter {
    fn matches(self, is_active: bool) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Active => is_active,
            StatusFilter::Inactive => !is_active,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct EmployeeFilter {
    /// Case-insensitive substring of "first last".
    #[schema(example = "jane")]
    pub search: String,
    pub gender: GenderFilter,
    pub status: StatusFilter,
}

impl EmployeeFilter {
    /// `needle` is the already-lowercased search text.
    fn matches_lowered(&self, employee: &Employee, needle: &str) -> bool {
        employee.full_name().to_lowercase().contains(needle)
            && self.gender.matches(employee.gender)
            && self.status.matches(employee.is_active)
    }
}

/// Matching records, newest-added first.
pub fn filter_employees<'a>(employees: &'a [Employee], filter: &EmployeeFilter) -> Vec<&'a Employee> {
    let needle = filter.search.to_lowercase();
    employees
        .iter()
        .rev()
        .filter(|e| filter.matches_lowered(e, &needle))
        .collect()
}

pub fn page_count(matches: usize, page_size: usize) -> usize {
    matches.div_ceil(page_size.max(1))
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub items: Vec<Employee>,
    #[schema(example = 1)]
    pub page: usize,
    #[schema(example = 4)]
    pub page_size: usize,
    #[schema(example = 3)]
    pub page_count: usize,
    #[schema(example = 10)]
    pub total_matches: usize,
}

/// Slice one 1-based page out of `matches`. Pages past the end come back empty.
pub fn paginate(matches: &[Employee], page: usize, page_size: usize) -> Page {
    let page_size = page_size.max(1);
    let start = page.saturating_sub(1).saturating_mul(page_size).min(matches.len());
    let end = start.saturating_add(page_size).min(matches.len());

    Page {
        items: matches[start..end].to_vec(),
        page,
        page_size,
        page_count: page_count(matches.len(), page_size),
        total_matches: matches.len(),
    }
}

/// Dashboard list state: the live filter inputs plus the page being shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView {
    filter: EmployeeFilter,
    current_page: usize,
    page_size: usize,
}

impl ListView {
    pub fn new(page_size: usize) -> Self {
        Self {
            filter: EmployeeFilter::default(),
            current_page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn filter(&self) -> &EmployeeFilter {
        &self.filter
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Any filter change sends the view back to page 1.
    pub fn set_filter(&mut self, filter: EmployeeFilter) {
        self.filter = filter;
        self.current_page = 1;
    }

    /// Move to `page` if it lies in `[1, page_count]`; otherwise stay put.
    pub fn go_to(&mut self, page: usize, employees: &[Employee]) -> bool {
        let pages = page_count(filter_employees(employees, &self.filter).len(), self.page_size);
        if (1..=pages).contains(&page) {
            self.current_page = page;
            true
        } else {
            false
        }
    }

    /// The current page, pulled back to the last one when the match set has
    /// shrunk underneath it.
    pub fn render(&self, employees: &[Employee]) -> Page {
        let matches: Vec<Employee> = filter_employees(employees, &self.filter)
            .into_iter()
            .cloned()
            .collect();
        let last = page_count(matches.len(), self.page_size).max(1);
        paginate(&matches, self.current_page.min(last), self.page_size)
    }
}
