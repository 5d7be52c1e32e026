//! The deposit lifecycle operations.
//!
//! Every operation follows the same shape: check the state guard and all
//! other preconditions against the record and collaborators, then apply the
//! whole transition. Nothing is written until every check has passed, so a
//! rejected call leaves the record as it was.

use tbtc_btc_spv::{EpochDifficulty, SpvProof, check_spv_proof};
use tbtc_primitives::{Address, NativeAmount};
use tracing::*;

use crate::{
    context::ExecContext,
    errors::{DepositError, DepositResult, Timer},
    escrow::NativeCoin,
    events::{DepositEvent, ExecOutput},
    funding::{check_funding_output, parse_signer_pubkey},
    interfaces::{DifficultyOracle, OwnerTokenRegistry, SigningGroupGateway, SystemRegistry},
    params::DepositParams,
    state::{DepositRecord, DepositState, FundingInfo, FundingOutpoint},
};

/// Version tag of the logic below. Bumped on any change to transition rules.
pub const DEPOSIT_LOGIC_VERSION: u32 = 1;

/// The immutable deposit logic shared by every instance.
///
/// Holds no per-deposit state: each call takes the record it acts on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DepositLogic {
    version: u32,
    params: DepositParams,
}

impl DepositLogic {
    pub fn new(params: DepositParams) -> Self {
        Self {
            version: DEPOSIT_LOGIC_VERSION,
            params,
        }
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn params(&self) -> &DepositParams {
        &self.params
    }

    /// Opens the deposit: mints the owner token to the caller and asks the
    /// gateway for a signing group, forwarding the bond.
    ///
    /// # Errors
    ///
    /// - [`DepositError::WrongState`] unless the record is in [`DepositState::Start`].
    /// - [`DepositError::ZeroTimestamp`] if the context carries ledger time zero.
    /// - [`DepositError::NewDepositsPaused`] if the system registry disallows new deposits.
    /// - [`DepositError::LotSizeNotAllowed`] for a lot size the system does not offer.
    /// - [`DepositError::InsufficientBond`] if `bond` is below the setup fee estimate.
    #[expect(clippy::too_many_arguments, reason = "one parameter per collaborator")]
    pub fn initialize_deposit(
        &self,
        rec: &mut DepositRecord,
        ctx: &ExecContext,
        system: &impl SystemRegistry,
        gateway: &mut impl SigningGroupGateway,
        tokens: &mut impl OwnerTokenRegistry,
        lot_size_sats: u64,
        bond: NativeAmount,
    ) -> DepositResult<ExecOutput> {
        ensure_state(rec, DepositState::Start)?;
        ensure_clock_set(ctx)?;

        if !system.new_deposits_allowed() {
            return Err(DepositError::NewDepositsPaused);
        }

        if !system.is_allowed_lot_size(lot_size_sats) {
            return Err(DepositError::LotSizeNotAllowed(lot_size_sats));
        }

        let required = system.setup_fee_estimate();
        if bond < required {
            return Err(DepositError::InsufficientBond {
                required,
                provided: bond,
            });
        }

        let mut escrow = rec.escrow().clone();
        escrow
            .lock_with_signers(bond)
            .ok_or(DepositError::EscrowOverflow)?;

        let deposit = *rec.address();
        tokens.mint(*ctx.caller(), deposit);
        let keep = gateway.request_signing_group(&deposit, bond);

        rec.set_keep(keep, lot_size_sats, system.signer_fee_divisor());
        *rec.escrow_mut() = escrow;
        rec.set_signing_group_requested_at(ctx.timestamp());
        rec.set_state(DepositState::AwaitingSignerSetup);

        info!(%deposit, %keep, lot_size_sats, %bond, "deposit initialized");

        let mut out = ExecOutput::new_empty();
        out.emit(DepositEvent::Created {
            deposit,
            keep_address: keep,
        });
        Ok(out)
    }

    /// Pulls the signing group's key from the gateway and starts the funding
    /// timer.
    ///
    /// # Errors
    ///
    /// - [`DepositError::WrongState`] unless awaiting signer setup.
    /// - [`DepositError::ZeroTimestamp`] if the context carries ledger time zero.
    /// - [`DepositError::PubkeyUnavailable`] if the gateway has no 64-byte key yet.
    /// - [`DepositError::InvalidPubkey`] if the key has a zero half or is off the curve.
    pub fn retrieve_signer_pubkey(
        &self,
        rec: &mut DepositRecord,
        ctx: &ExecContext,
        gateway: &impl SigningGroupGateway,
    ) -> DepositResult<ExecOutput> {
        ensure_state(rec, DepositState::AwaitingSignerSetup)?;
        ensure_clock_set(ctx)?;

        let raw = rec
            .keep_address()
            .map(|keep| gateway.public_key(keep))
            .unwrap_or_default();
        let pubkey = parse_signer_pubkey(&raw)?;

        rec.set_signing_group_pubkey(pubkey);
        rec.set_signing_group_requested_at(0);
        rec.set_funding_proof_timer_start(ctx.timestamp());
        rec.set_state(DepositState::AwaitingBtcFundingProof);

        let deposit = *rec.address();
        info!(%deposit, pubkey_x = %pubkey.x, "signer pubkey registered");

        let mut out = ExecOutput::new_empty();
        out.emit(DepositEvent::RegisteredPubkey { deposit, pubkey });
        Ok(out)
    }

    /// Fails the deposit when the signing group never formed, refunding the
    /// bond to the owner-token holder as a withdrawable balance.
    ///
    /// # Errors
    ///
    /// - [`DepositError::WrongState`] unless awaiting signer setup.
    /// - [`DepositError::TimerNotStarted`] if the request time was never recorded.
    /// - [`DepositError::TimeoutNotElapsed`] until strictly more than the formation timeout
    ///   has passed.
    /// - [`DepositError::OwnerTokenMissing`] if nobody holds the owner token.
    /// - [`DepositError::ExcessBondReturned`] if the group hands back more than was
    ///   locked with it. The coin goes back to the group.
    pub fn notify_signer_setup_failed(
        &self,
        rec: &mut DepositRecord,
        ctx: &ExecContext,
        gateway: &mut impl SigningGroupGateway,
        tokens: &impl OwnerTokenRegistry,
    ) -> DepositResult<ExecOutput> {
        ensure_state(rec, DepositState::AwaitingSignerSetup)?;
        ensure_timeout_elapsed(
            Timer::SigningGroupFormation,
            rec.signing_group_requested_at(),
            self.params.signing_group_formation_timeout,
            ctx.timestamp(),
        )?;

        let deposit = *rec.address();
        let owner = tokens
            .owner_of(&deposit)
            .ok_or(DepositError::OwnerTokenMissing(deposit))?;

        let mut escrow = rec.escrow().clone();
        let mut refunded = NativeAmount::ZERO;
        if let Some(keep) = rec.keep_address() {
            let refund = gateway.return_bond(keep);
            refunded = refund.amt();
            if let Err(refused) = escrow.release_to(owner, refund) {
                gateway.restore_bond(keep, refused);
                warn!(
                    %deposit,
                    %refunded,
                    locked = %escrow.locked_with_signers(),
                    "refused bond refund"
                );
                return Err(DepositError::ExcessBondReturned {
                    locked: escrow.locked_with_signers(),
                    returned: refunded,
                });
            }
        }

        *rec.escrow_mut() = escrow;
        rec.set_signing_group_requested_at(0);
        rec.set_funding_proof_timer_start(0);
        rec.set_state(DepositState::FailedSetup);

        warn!(%deposit, %owner, %refunded, "signer setup failed");

        let mut out = ExecOutput::new_empty();
        out.emit(DepositEvent::SetupFailed { deposit });
        Ok(out)
    }

    /// Accepts an SPV proof of the Bitcoin payment and activates the deposit.
    ///
    /// # Errors
    ///
    /// - [`DepositError::WrongState`] unless awaiting the funding proof.
    /// - [`DepositError::ZeroTimestamp`] if the context carries ledger time zero.
    /// - [`DepositError::ProofRejected`] if any transaction, merkle or header check fails.
    /// - [`DepositError::NoMatchingFundingOutput`] if the named output does not pay the
    ///   signer key at least the lot size.
    pub fn provide_btc_funding_proof(
        &self,
        rec: &mut DepositRecord,
        ctx: &ExecContext,
        oracle: &impl DifficultyOracle,
        proof: &SpvProof,
    ) -> DepositResult<ExecOutput> {
        ensure_state(rec, DepositState::AwaitingBtcFundingProof)?;
        ensure_clock_set(ctx)?;

        let deposit = *rec.address();
        let difficulty = EpochDifficulty {
            current: oracle.current_epoch_difficulty(),
            previous: oracle.previous_epoch_difficulty(),
        };
        let verified = check_spv_proof(proof, difficulty, &self.params.proof)
            .inspect_err(|err| warn!(%deposit, %err, "funding proof rejected"))?;

        let index = proof.funding_output_index;
        let output = verified.tx.output(index)?;
        let value_sats = check_funding_output(
            output,
            index,
            rec.signing_group_pubkey(),
            rec.lot_size_sats(),
        )?;

        let txid = verified.txid();
        let outpoint = FundingOutpoint { txid, vout: index };
        rec.set_funding_info(FundingInfo::new(value_sats, ctx.timestamp(), outpoint));
        rec.set_funding_proof_timer_start(0);
        rec.set_signing_group_requested_at(ctx.timestamp());
        rec.set_state(DepositState::Active);

        info!(%deposit, %txid, value_sats, "deposit funded");

        let mut out = ExecOutput::new_empty();
        out.emit(DepositEvent::Funded { deposit, txid });
        Ok(out)
    }

    /// Fails the deposit when no funding proof arrived in time. The bond
    /// stays with the signing group.
    ///
    /// # Errors
    ///
    /// - [`DepositError::WrongState`] unless awaiting the funding proof.
    /// - [`DepositError::TimerNotStarted`] if the funding timer is zero.
    /// - [`DepositError::TimeoutNotElapsed`] until strictly more than the funding timeout
    ///   has passed.
    pub fn notify_funding_timed_out(
        &self,
        rec: &mut DepositRecord,
        ctx: &ExecContext,
    ) -> DepositResult<ExecOutput> {
        ensure_state(rec, DepositState::AwaitingBtcFundingProof)?;
        ensure_timeout_elapsed(
            Timer::FundingProof,
            rec.funding_proof_timer_start(),
            self.params.funding_proof_timeout,
            ctx.timestamp(),
        )?;

        rec.set_funding_proof_timer_start(0);
        rec.set_state(DepositState::FailedSetup);

        let deposit = *rec.address();
        warn!(%deposit, "funding proof timed out");

        let mut out = ExecOutput::new_empty();
        out.emit(DepositEvent::SetupFailed { deposit });
        Ok(out)
    }

    /// Records where the funder wants an abort refund sent. Owner only, and
    /// may be repeated; moves no funds.
    ///
    /// # Errors
    ///
    /// - [`DepositError::FundingNotFailed`] unless in [`DepositState::FailedSetup`].
    /// - [`DepositError::Unauthorized`] if the caller does not hold the owner token.
    pub fn request_funder_abort(
        &self,
        rec: &mut DepositRecord,
        ctx: &ExecContext,
        tokens: &impl OwnerTokenRegistry,
        output_script: &[u8],
    ) -> DepositResult<ExecOutput> {
        if rec.state() != DepositState::FailedSetup {
            return Err(DepositError::FundingNotFailed(rec.state()));
        }

        let deposit = *rec.address();
        ensure_owner(tokens, &deposit, ctx.caller())?;

        rec.set_funder_abort_script(output_script.to_vec());

        info!(%deposit, script_len = output_script.len(), "funder abort requested");

        let mut out = ExecOutput::new_empty();
        out.emit(DepositEvent::FunderAbortRequested {
            deposit,
            output_script: output_script.to_vec(),
        });
        Ok(out)
    }

    /// Pays the caller everything the deposit owes it.
    ///
    /// # Errors
    ///
    /// [`DepositError::NothingToWithdraw`] if the caller has no balance.
    pub fn withdraw_funds(
        &self,
        rec: &mut DepositRecord,
        ctx: &ExecContext,
    ) -> DepositResult<NativeCoin> {
        let caller = *ctx.caller();
        let coin = rec
            .escrow_mut()
            .withdraw(&caller)
            .ok_or(DepositError::NothingToWithdraw(caller))?;

        debug!(deposit = %rec.address(), %caller, amount = %coin.amt(), "funds withdrawn");
        Ok(coin)
    }

    /// Balance `who` could withdraw right now.
    pub fn withdrawable_amount(&self, rec: &DepositRecord, who: &Address) -> NativeAmount {
        rec.escrow().withdrawable_amount(who)
    }
}

fn ensure_state(rec: &DepositRecord, expected: DepositState) -> DepositResult<()> {
    if rec.state() != expected {
        return Err(DepositError::WrongState {
            expected,
            found: rec.state(),
        });
    }
    Ok(())
}

fn ensure_owner(
    tokens: &impl OwnerTokenRegistry,
    deposit: &Address,
    caller: &Address,
) -> DepositResult<()> {
    match tokens.owner_of(deposit) {
        Some(owner) if owner == *caller => Ok(()),
        _ => Err(DepositError::Unauthorized(*caller)),
    }
}

/// Zero marks an unset timer, so it can never be recorded as a start time.
fn ensure_clock_set(ctx: &ExecContext) -> DepositResult<()> {
    if ctx.timestamp() == 0 {
        return Err(DepositError::ZeroTimestamp);
    }
    Ok(())
}

/// Strict: exactly `timeout` seconds elapsed is still too early.
fn ensure_timeout_elapsed(timer: Timer, start: u64, timeout: u64, now: u64) -> DepositResult<()> {
    if start == 0 {
        return Err(DepositError::TimerNotStarted(timer));
    }

    let elapsed = now.saturating_sub(start);
    if elapsed <= timeout {
        return Err(DepositError::TimeoutNotElapsed {
            timer,
            elapsed,
            timeout,
        });
    }
    Ok(())
}
