use anchor_lang::prelude::*;

use crate::constants::MAX_ROLE_MEMBERS;
use crate::errors::StakingError;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    /// Pause control and role administration
    Admin,
    /// Force-exit of any account
    Emergency,
    /// Funding and draining the reward pool
    RewardManager,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Emergency, Role::RewardManager];

    fn bit(self) -> u8 {
        match self {
            Role::Admin => 1 << 0,
            Role::Emergency => 1 << 1,
            Role::RewardManager => 1 << 2,
        }
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RoleMember {
    pub member: Pubkey,
    /// Bit set of granted roles; 0 marks a free slot
    pub roles: u8,
}

/// Fixed-size permission table keyed by member.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RoleTable {
    pub members: [RoleMember; MAX_ROLE_MEMBERS],
}

impl RoleTable {
    pub const SIZE: usize = (32 + 1) * MAX_ROLE_MEMBERS;

    pub fn has_role(&self, role: Role, who: &Pubkey) -> bool {
        self.members
            .iter()
            .any(|m| m.roles & role.bit() != 0 && m.member == *who)
    }

    pub fn require(&self, role: Role, who: &Pubkey) -> Result<()> {
        require!(self.has_role(role, who), StakingError::Unauthorized);
        Ok(())
    }

    pub fn grant(&mut self, role: Role, who: Pubkey) -> Result<()> {
        require!(who != Pubkey::default(), StakingError::InvalidParameters);

        if let Some(entry) = self
            .members
            .iter_mut()
            .find(|m| m.roles != 0 && m.member == who)
        {
            entry.roles |= role.bit();
            return Ok(());
        }

        let slot = self
            .members
            .iter_mut()
            .find(|m| m.roles == 0)
            .ok_or(StakingError::RoleTableFull)?;
        *slot = RoleMember {
            member: who,
            roles: role.bit(),
        };
        Ok(())
    }

    pub fn revoke(&mut self, role: Role, who: &Pubkey) {
        for entry in self.members.iter_mut().filter(|m| m.member == *who) {
            entry.roles &= !role.bit();
            if entry.roles == 0 {
                *entry = RoleMember::default();
            }
        }
    }
}
