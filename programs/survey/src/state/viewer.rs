use anchor_lang::prelude::*;

/// Role tier of an authorized viewer. Tiers carry no on-chain behavior
/// difference; they classify grants for off-chain consumers.
#[derive(AnchorSerialize, AnchorDeserialize, InitSpace, Clone, Copy, PartialEq, Eq, Debug)]
pub enum ViewerRole {
    Observer,
    Analyst,
    Auditor,
}

/// Grants one address the right to have the survey tallies re-encrypted to
/// its key. The survey authority needs no grant; it is always authorized.
#[account]
#[derive(InitSpace)]
pub struct ViewerGrant {
    /// PDA bump seed
    pub bump: u8,
    pub survey: Pubkey,
    pub viewer: Pubkey,
    pub role: ViewerRole,
    /// Unix timestamp after which the grant stops working; 0 = no expiry
    pub expires_at: i64,
    pub granted_at: i64,
}

impl ViewerGrant {
    pub fn is_active_at(&self, now: i64) -> bool {
        self.expires_at == 0 || now < self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grant(expires_at: i64) -> ViewerGrant {
        ViewerGrant {
            bump: 255,
            survey: Pubkey::new_unique(),
            viewer: Pubkey::new_unique(),
            role: ViewerRole::Observer,
            expires_at,
            granted_at: 10,
        }
    }

    #[test]
    fn zero_expiry_never_expires() {
        assert!(grant(0).is_active_at(i64::MAX));
    }

    #[test]
    fn expiry_is_exclusive() {
        let g = grant(100);
        assert!(g.is_active_at(99));
        assert!(!g.is_active_at(100));
        assert!(!g.is_active_at(101));
    }
}
