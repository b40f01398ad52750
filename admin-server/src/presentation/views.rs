use serde::Serialize;
use utoipa::ToSchema;

/// Общие данные страниц админки, рендерит их слой шаблонов.
#[derive(Debug, Clone)]
pub(crate) struct PageContext {
    layout: String,
    description: String,
}

impl PageContext {
    pub(crate) const LOGIN: &'static str = "admins/index";
    pub(crate) const DASHBOARD: &'static str = "admins/dashboard";
    pub(crate) const ADD_POST: &'static str = "admins/add-post";
    pub(crate) const EDIT_POST: &'static str = "admins/edit-post";

    pub(crate) fn new(layout: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            layout: layout.into(),
            description: description.into(),
        }
    }

    pub(crate) fn page(&self, view: &str, title: &str) -> PageDto {
        PageDto {
            view: view.to_string(),
            layout: self.layout.clone(),
            locals: LocalsDto {
                title: title.to_string(),
                description: self.description.clone(),
            },
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct LocalsDto {
    pub(crate) title: String,
    pub(crate) description: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct PageDto {
    pub(crate) view: String,
    pub(crate) layout: String,
    pub(crate) locals: LocalsDto,
}
