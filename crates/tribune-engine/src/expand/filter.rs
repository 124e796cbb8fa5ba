//! Visibility and display filtering of expanded instances.

use std::collections::BTreeSet;

use tribune_model::appointment::Visibility;
use tribune_model::instance::AppointmentInstance;

/// Team memberships of the member a result set is computed for.
#[derive(Debug, Clone, Default)]
pub struct ViewerContext {
    pub team_ids: BTreeSet<String>,
}

impl ViewerContext {
    #[must_use]
    pub fn new<I, S>(team_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            team_ids: team_ids.into_iter().map(Into::into).collect(),
        }
    }

    /// Visibility check: `all` instances are always visible, team-scoped
    /// ones require an intersecting membership.
    #[must_use]
    pub fn can_see(&self, instance: &AppointmentInstance) -> bool {
        instance.visibility.permits(&self.team_ids)
    }
}

/// How cancelled occurrences are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CancelledFilter {
    /// Drop cancelled occurrences (normal display).
    #[default]
    Exclude,
    /// Keep only cancelled occurrences (the absence-review path).
    Only,
}

/// Optional caller-supplied narrowing, applied after the visibility check.
#[derive(Debug, Clone, Default)]
pub struct InstanceFilter {
    /// Restrict to these appointment types.
    pub type_ids: Option<BTreeSet<String>>,
    /// Restrict to these teams; instances visible to everyone always pass.
    pub team_ids: Option<BTreeSet<String>>,
    pub cancelled: CancelledFilter,
}

impl InstanceFilter {
    fn passes(&self, instance: &AppointmentInstance) -> bool {
        match self.cancelled {
            CancelledFilter::Exclude => {
                if instance.is_cancelled {
                    return false;
                }
            }
            CancelledFilter::Only => {
                if !instance.is_cancelled {
                    return false;
                }
            }
        }

        if let Some(type_ids) = &self.type_ids {
            if !type_ids.contains(&instance.type_id) {
                return false;
            }
        }

        if let Some(team_ids) = &self.team_ids {
            match &instance.visibility {
                Visibility::All => {}
                Visibility::SpecificTeams {
                    team_ids: instance_teams,
                } => {
                    if instance_teams.is_disjoint(team_ids) {
                        return false;
                    }
                }
            }
        }

        true
    }
}

/// ## Summary
/// Applies the viewer's visibility check and the caller's display filters,
/// preserving instance order.
#[must_use]
pub fn filter_instances(
    instances: Vec<AppointmentInstance>,
    viewer: &ViewerContext,
    selection: &InstanceFilter,
) -> Vec<AppointmentInstance> {
    instances
        .into_iter()
        .filter(|instance| viewer.can_see(instance) && selection.passes(instance))
        .collect()
}
