pub(crate) mod list_user_reviews;
pub(crate) mod set_user_is_active;

pub use list_user_reviews::ListUserReviews;
pub use set_user_is_active::SetUserIsActive;
