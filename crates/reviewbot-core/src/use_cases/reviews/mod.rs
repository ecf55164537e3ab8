pub(crate) mod select_replacement_reviewer;
pub(crate) mod select_reviewers;

pub use select_replacement_reviewer::SelectReplacementReviewerInterface;
pub use select_reviewers::SelectReviewersInterface;

#[cfg(any(test, feature = "testkit"))]
pub use self::{
    select_replacement_reviewer::MockSelectReplacementReviewerInterface,
    select_reviewers::MockSelectReviewersInterface,
};
