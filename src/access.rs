//! Access Grant Synthesizer.
//!
//! Read access to a generated type goes to the groups that can read
//! *every* source model of the report. Explicitly chosen groups get
//! read-write access on top.

use std::collections::BTreeSet;

use tracing::debug;

use crate::model::{AccessId, AccessMode, AccessRule, GroupId, TypeId, UserId};
use crate::platform::{AccessStore, Directory, PlatformResult};

/// Groups that hold read access on all of `models`.
///
/// No models means no groups.
pub fn read_groups<'m>(
    store: &impl AccessStore,
    models: impl IntoIterator<Item = &'m str>,
) -> PlatformResult<BTreeSet<GroupId>> {
    let mut result: Option<BTreeSet<GroupId>> = None;
    for model in models {
        let groups = store.groups_with_access(model, AccessMode::Read)?;
        result = Some(match result {
            None => groups,
            Some(acc) => acc.intersection(&groups).copied().collect(),
        });
    }
    Ok(result.unwrap_or_default())
}

/// Grant rows for a generated type.
pub fn plan_grants(
    model_name: &str,
    type_id: TypeId,
    read_groups: &BTreeSet<GroupId>,
    write_groups: &BTreeSet<GroupId>,
) -> Vec<AccessRule> {
    let read = read_groups.iter().map(|&group| {
        AccessRule::read_only(format!("read access to {model_name}"), type_id, group)
    });
    let write = write_groups.iter().map(|&group| {
        AccessRule::read_write(format!("read-write access to {model_name}"), type_id, group)
    });
    read.chain(write).collect()
}

/// Compute and persist every grant of a generated type.
pub fn grant_access<'m, S: AccessStore>(
    store: &mut S,
    model_name: &str,
    type_id: TypeId,
    source_models: impl IntoIterator<Item = &'m str>,
    write_groups: &BTreeSet<GroupId>,
) -> PlatformResult<Vec<AccessId>> {
    let readers = read_groups(&*store, source_models)?;
    debug!(%model_name, readers = ?readers, writers = ?write_groups, "granting access");

    plan_grants(model_name, type_id, &readers, write_groups)
        .iter()
        .map(|rule| store.create_access(rule))
        .collect()
}

/// Users a report is visible to: members of `groups`, or everyone.
pub fn compute_user_ids(
    directory: &impl Directory,
    groups: &BTreeSet<GroupId>,
) -> PlatformResult<BTreeSet<UserId>> {
    if groups.is_empty() {
        directory.all_users()
    } else {
        directory.group_members(groups)
    }
}
