pub(crate) mod add_team;
pub(crate) mod deactivate_team_members;
pub(crate) mod get_team;

pub use add_team::AddTeam;
pub use deactivate_team_members::DeactivateTeamMembersInterface;
pub use get_team::GetTeam;

#[cfg(any(test, feature = "testkit"))]
pub use self::deactivate_team_members::MockDeactivateTeamMembersInterface;
