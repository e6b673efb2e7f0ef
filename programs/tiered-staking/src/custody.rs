use anchor_lang::prelude::*;
use anchor_spl::token_interface::{self, TokenAccount, TransferChecked};

use crate::constants::VAULT_SEED;
use crate::errors::StakingError;

/// Asset ledger as seen from the vault. Each instance is bound to one
/// counterparty: `transfer_in` pulls from it, `transfer_out` pays it.
pub trait TokenCustody {
    /// Tokens currently held in custody
    fn balance(&self) -> u64;

    /// Returns the amount custody actually received
    fn transfer_in(&mut self, amount: u64) -> Result<u64>;

    fn transfer_out(&mut self, amount: u64) -> Result<()>;
}

/// SPL Token / Token-2022 custody held by the vault PDA.
pub struct SplCustody<'info> {
    pub token_program: AccountInfo<'info>,
    pub mint: AccountInfo<'info>,
    pub vault: AccountInfo<'info>,
    pub vault_tokens: AccountInfo<'info>,
    pub counterparty: AccountInfo<'info>,
    pub counterparty_tokens: AccountInfo<'info>,
    pub decimals: u8,
    pub vault_bump: u8,
    /// Custody balance, tracked across the transfers made through this handle
    pub balance: u64,
}

impl<'info> SplCustody<'info> {
    fn held_on_chain(&self) -> Result<u64> {
        let data = self.vault_tokens.try_borrow_data()?;
        let account = TokenAccount::try_deserialize(&mut &data[..])?;
        Ok(account.amount)
    }
}

impl<'info> TokenCustody for SplCustody<'info> {
    fn balance(&self) -> u64 {
        self.balance
    }

    fn transfer_in(&mut self, amount: u64) -> Result<u64> {
        let cpi_accounts = TransferChecked {
            from: self.counterparty_tokens.clone(),
            mint: self.mint.clone(),
            to: self.vault_tokens.clone(),
            authority: self.counterparty.clone(),
        };
        let cpi_ctx = CpiContext::new(self.token_program.clone(), cpi_accounts);
        token_interface::transfer_checked(cpi_ctx, amount, self.decimals)?;

        // Token-2022 fee extensions can withhold part of the transfer
        let held = self.held_on_chain()?;
        let received = held
            .checked_sub(self.balance)
            .ok_or(StakingError::Overflow)?;
        self.balance = held;
        Ok(received)
    }

    fn transfer_out(&mut self, amount: u64) -> Result<()> {
        require!(amount <= self.balance, StakingError::InsufficientCustody);

        let mint_key = *self.mint.key;
        let seeds = &[VAULT_SEED, mint_key.as_ref(), &[self.vault_bump]];
        let signer_seeds = &[&seeds[..]];

        let cpi_accounts = TransferChecked {
            from: self.vault_tokens.clone(),
            mint: self.mint.clone(),
            to: self.counterparty_tokens.clone(),
            authority: self.vault.clone(),
        };
        let cpi_ctx = CpiContext::new_with_signer(
            self.token_program.clone(),
            cpi_accounts,
            signer_seeds,
        );
        token_interface::transfer_checked(cpi_ctx, amount, self.decimals)?;

        self.balance -= amount;
        Ok(())
    }
}
