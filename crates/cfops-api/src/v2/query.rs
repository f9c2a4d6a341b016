/// Sort direction for v2 list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderDirection {
    Asc,
    Desc,
}

impl OrderDirection {
    fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Filters and paging options for a v2 list request.
///
/// Filters become repeated `q=<field>:<value>` parameters, which the
/// Cloud Controller combines with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    filters: Vec<(String, String)>,
    params: Vec<(String, String)>,
    results_per_page: Option<u32>,
    order_direction: Option<OrderDirection>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a `q=<field>:<value>` equality filter.
    pub fn filter(mut self, field: &str, value: impl Into<String>) -> Self {
        self.filters.push((field.to_owned(), value.into()));
        self
    }

    /// Add a raw query parameter (e.g. `return_user_provided_service_instances`).
    pub fn param(mut self, key: &str, value: impl Into<String>) -> Self {
        self.params.push((key.to_owned(), value.into()));
        self
    }

    pub fn results_per_page(mut self, n: u32) -> Self {
        self.results_per_page = Some(n);
        self
    }

    pub fn order_direction(mut self, direction: OrderDirection) -> Self {
        self.order_direction = Some(direction);
        self
    }

    /// Render as query parameters for the given page.
    pub fn to_params(&self, page: u32) -> Vec<(String, String)> {
        let mut out: Vec<(String, String)> = self
            .filters
            .iter()
            .map(|(field, value)| ("q".to_owned(), format!("{field}:{value}")))
            .collect();
        out.extend(self.params.iter().cloned());
        out.push(("page".to_owned(), page.to_string()));
        if let Some(n) = self.results_per_page {
            out.push(("results-per-page".to_owned(), n.to_string()));
        }
        if let Some(direction) = self.order_direction {
            out.push(("order-direction".to_owned(), direction.as_str().to_owned()));
        }
        out
    }
}
