//! Routing definitions for the Scorecalc UI.
use crate::features::admin::logic::AdminSection;
use yew_router::prelude::*;

#[derive(Clone, Routable, PartialEq, Eq, Debug)]
pub(crate) enum Route {
    #[at("/")]
    Calculator,
    #[at("/login")]
    Login,
    #[at("/admin")]
    Admin,
    #[at("/admin/categories")]
    AdminCategories,
    #[at("/admin/elements")]
    AdminElements,
    #[at("/admin/element-types")]
    AdminElementTypes,
    #[at("/admin/exercises")]
    AdminExercises,
    #[not_found]
    #[at("/404")]
    NotFound,
}

impl Route {
    /// Admin pages are only reachable with validated credentials.
    pub(crate) const fn requires_auth(&self) -> bool {
        matches!(
            self,
            Self::Admin
                | Self::AdminCategories
                | Self::AdminElements
                | Self::AdminElementTypes
                | Self::AdminExercises
        )
    }

    pub(crate) const fn admin_section(section: AdminSection) -> Self {
        match section {
            AdminSection::Categories => Self::AdminCategories,
            AdminSection::Elements => Self::AdminElements,
            AdminSection::ElementTypes => Self::AdminElementTypes,
            AdminSection::Exercises => Self::AdminExercises,
        }
    }
}
