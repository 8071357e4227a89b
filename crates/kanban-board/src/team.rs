//! Team roster kept next to the board.
//!
//! Same lifecycle as the project list: load (seeding example members when
//! the store is empty), change in memory, then overwrite the `teamMembers`
//! snapshot.

use kanban_models::{example_team, MemberId, TeamMember};
use kanban_persistence::{codec, SnapshotStore, TEAM_KEY};
use tracing::info;

use crate::commit::{write_snapshot, SaveOutcome};
use crate::error::{BoardError, Result, ValidationError};

/// Registry of team members.
pub struct TeamRegistry<S: SnapshotStore> {
    store: S,
    members: Option<Vec<TeamMember>>,
}

impl<S: SnapshotStore> TeamRegistry<S> {
    /// Creates a registry over `store`.
    pub fn new(store: S) -> Self {
        Self {
            store,
            members: None,
        }
    }

    /// Reads the roster, seeding the example members when the store has
    /// none.
    ///
    /// # Errors
    /// `Persistence` if the store cannot be read or the snapshot is invalid.
    pub fn load(&mut self) -> Result<SaveOutcome> {
        match self.store.get(TEAM_KEY)? {
            Some(data) => {
                let members = codec::decode_team(&data)?;
                info!(count = members.len(), "Loaded team roster");
                self.members = Some(members);
                Ok(SaveOutcome::Skipped)
            }
            None => {
                info!("No team snapshot; seeding examples");
                let members = example_team();
                let save = write_snapshot(&self.store, TEAM_KEY, &members);
                self.members = Some(members);
                Ok(save)
            }
        }
    }

    /// Current members, in joining order.
    pub fn members(&self) -> Result<&[TeamMember]> {
        self.members.as_deref().ok_or(BoardError::NotLoaded)
    }

    /// Looks up a member by id.
    pub fn member(&self, id: &MemberId) -> Result<&TeamMember> {
        self.members()?
            .iter()
            .find(|member| &member.id == id)
            .ok_or_else(|| BoardError::MemberNotFound(id.clone()))
    }

    /// Adds a member to the end of the roster.
    ///
    /// Name, role and email are trimmed and must not be blank.
    ///
    /// # Errors
    /// `Validation` naming the first blank required field.
    pub fn add(&mut self, member: TeamMember) -> Result<(MemberId, SaveOutcome)> {
        let members = self.members.as_mut().ok_or(BoardError::NotLoaded)?;
        let member = normalized(member)?;
        let id = member.id.clone();
        info!(member_id = %id, name = %member.name, role = %member.role, "Added team member");
        members.push(member);

        let save = write_snapshot(&self.store, TEAM_KEY, members.as_slice());
        Ok((id, save))
    }

    /// Replaces the member with the same id, keeping its place.
    ///
    /// # Errors
    /// `MemberNotFound` for an unknown id, `Validation` for a blank
    /// required field.
    pub fn update(&mut self, member: TeamMember) -> Result<SaveOutcome> {
        let members = self.members.as_mut().ok_or(BoardError::NotLoaded)?;
        let slot = members
            .iter_mut()
            .find(|existing| existing.id == member.id)
            .ok_or_else(|| BoardError::MemberNotFound(member.id.clone()))?;
        *slot = normalized(member)?;
        info!(member_id = %slot.id, name = %slot.name, "Updated team member");

        let save = write_snapshot(&self.store, TEAM_KEY, members.as_slice());
        Ok(save)
    }

    /// Takes a member off the roster.
    ///
    /// # Errors
    /// `MemberNotFound` if no member has that id.
    pub fn remove(&mut self, id: &MemberId) -> Result<(TeamMember, SaveOutcome)> {
        let members = self.members.as_mut().ok_or(BoardError::NotLoaded)?;
        let index = members
            .iter()
            .position(|member| &member.id == id)
            .ok_or_else(|| BoardError::MemberNotFound(id.clone()))?;
        let removed = members.remove(index);

        let save = write_snapshot(&self.store, TEAM_KEY, members.as_slice());
        info!(member_id = %id, name = %removed.name, "Removed team member");
        Ok((removed, save))
    }
}

/// Trims the required fields and rejects blank ones.
fn normalized(mut member: TeamMember) -> Result<TeamMember> {
    for (field, value) in [
        ("name", &mut member.name),
        ("role", &mut member.role),
        ("email", &mut member.email),
    ] {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::MissingMemberField(field).into());
        }
        *value = trimmed.to_string();
    }
    member.phone = member.phone.trim().to_string();
    Ok(member)
}
