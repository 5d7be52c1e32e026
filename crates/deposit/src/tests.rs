//! Lifecycle tests driving a single record through the logic.

use proptest::prelude::*;
use tbtc_btc_spv::{SpvError, SpvProof};
use tbtc_primitives::{Address, NativeAmount};

use crate::{
    params::{DEFAULT_LOT_SIZE_SATS, DEFAULT_SETUP_FEE_ESTIMATE},
    test_utils::*,
    *,
};

const T0: u64 = 1_556_000_000;
const TIMEOUT: u64 = params::DEFAULT_SIGNING_GROUP_FORMATION_TIMEOUT;

fn owner() -> Address {
    Address::new([0x0a; 20])
}

fn stranger() -> Address {
    Address::new([0x0b; 20])
}

struct Harness {
    logic: DepositLogic,
    rec: DepositRecord,
    system: StubSystem,
    gateway: StubSigningGroup,
    tokens: StubOwnerTokens,
    relay: StubRelay,
}

impl Harness {
    fn new() -> Self {
        Self {
            logic: DepositLogic::new(DepositParams::default()),
            rec: DepositRecord::new(Address::new([0xde; 20])),
            system: StubSystem::default(),
            gateway: StubSigningGroup::default(),
            tokens: StubOwnerTokens::default(),
            relay: StubRelay::mainnet(),
        }
    }

    fn ctx(ts: u64) -> ExecContext {
        ExecContext::new(ts, owner())
    }

    fn initialize_with(&mut self, lot_size_sats: u64, bond: NativeAmount) -> DepositResult<ExecOutput> {
        self.logic.initialize_deposit(
            &mut self.rec,
            &Self::ctx(T0),
            &self.system,
            &mut self.gateway,
            &mut self.tokens,
            lot_size_sats,
            bond,
        )
    }

    fn initialize(&mut self) -> ExecOutput {
        self.initialize_with(DEFAULT_LOT_SIZE_SATS, DEFAULT_SETUP_FEE_ESTIMATE)
            .expect("initialize")
    }

    fn keep(&self) -> Address {
        *self.rec.keep_address().expect("keep set")
    }

    fn publish_key(&mut self, key: &[u8]) {
        let keep = self.keep();
        self.gateway.set_public_key(&keep, key);
    }

    fn retrieve(&mut self, ts: u64) -> DepositResult<ExecOutput> {
        self.logic
            .retrieve_signer_pubkey(&mut self.rec, &Self::ctx(ts), &self.gateway)
    }

    fn notify_setup_failed(&mut self, ts: u64) -> DepositResult<ExecOutput> {
        self.logic.notify_signer_setup_failed(
            &mut self.rec,
            &Self::ctx(ts),
            &mut self.gateway,
            &self.tokens,
        )
    }

    fn prove(&mut self, ts: u64, proof: &SpvProof) -> DepositResult<ExecOutput> {
        self.logic
            .provide_btc_funding_proof(&mut self.rec, &Self::ctx(ts), &self.relay, proof)
    }

    fn notify_funding_timed_out(&mut self, ts: u64) -> DepositResult<ExecOutput> {
        self.logic
            .notify_funding_timed_out(&mut self.rec, &Self::ctx(ts))
    }

    fn request_abort(&mut self, caller: Address, script: &[u8]) -> DepositResult<ExecOutput> {
        self.logic.request_funder_abort(
            &mut self.rec,
            &ExecContext::new(T0, caller),
            &self.tokens,
            script,
        )
    }

    /// Drives the record to awaiting the funding proof, key retrieved at `T0 + 10`.
    fn awaiting_proof() -> Self {
        let mut h = Self::new();
        h.initialize();
        h.publish_key(&mainnet_signer_pubkey());
        h.retrieve(T0 + 10).expect("retrieve");
        h
    }
}

#[test]
fn test_initialize_deposit() {
    let mut h = Harness::new();
    let out = h.initialize();
    let keep = h.keep();

    assert_eq!(h.rec.state(), DepositState::AwaitingSignerSetup);
    assert_eq!(h.rec.signing_group_requested_at(), T0);
    assert_eq!(h.rec.funding_proof_timer_start(), 0);
    assert_eq!(h.rec.lot_size_sats(), DEFAULT_LOT_SIZE_SATS);
    assert_eq!(h.rec.signer_fee_divisor(), h.system.signer_fee_divisor);
    assert_eq!(h.tokens.owner_of(h.rec.address()), Some(owner()));
    assert_eq!(h.gateway.deposit_of(&keep), Some(*h.rec.address()));
    assert_eq!(h.gateway.bond_held(&keep), DEFAULT_SETUP_FEE_ESTIMATE);
    assert_eq!(h.rec.escrow().locked_with_signers(), DEFAULT_SETUP_FEE_ESTIMATE);
    assert_eq!(
        out.events(),
        &[DepositEvent::Created {
            deposit: *h.rec.address(),
            keep_address: keep,
        }]
    );
}

#[test]
fn test_initialize_insufficient_bond() {
    let mut h = Harness::new();
    let before = h.rec.clone();
    let low = NativeAmount::new(DEFAULT_SETUP_FEE_ESTIMATE.units() - 1);

    let err = h.initialize_with(DEFAULT_LOT_SIZE_SATS, low).unwrap_err();
    assert_eq!(
        err,
        DepositError::InsufficientBond {
            required: DEFAULT_SETUP_FEE_ESTIMATE,
            provided: low,
        }
    );
    assert_eq!(err.category(), ErrorCategory::InsufficientBond);
    assert_eq!(h.rec, before);
    assert!(h.tokens.is_empty());
    assert_eq!(h.gateway.request_count(), 0);
}

#[test]
fn test_initialize_twice_rejected() {
    let mut h = Harness::new();
    h.initialize();
    let before = h.rec.clone();

    let err = h
        .initialize_with(DEFAULT_LOT_SIZE_SATS, DEFAULT_SETUP_FEE_ESTIMATE)
        .unwrap_err();
    assert_eq!(
        err,
        DepositError::WrongState {
            expected: DepositState::Start,
            found: DepositState::AwaitingSignerSetup,
        }
    );
    assert_eq!(h.rec, before);
}

#[test]
fn test_initialize_when_paused() {
    let mut h = Harness::new();
    h.system.new_deposits_allowed = false;

    let err = h
        .initialize_with(DEFAULT_LOT_SIZE_SATS, DEFAULT_SETUP_FEE_ESTIMATE)
        .unwrap_err();
    assert_eq!(err, DepositError::NewDepositsPaused);
    assert_eq!(h.rec.state(), DepositState::Start);
}

#[test]
fn test_initialize_unlisted_lot_size() {
    let mut h = Harness::new();

    let err = h
        .initialize_with(12_345, DEFAULT_SETUP_FEE_ESTIMATE)
        .unwrap_err();
    assert_eq!(err, DepositError::LotSizeNotAllowed(12_345));
    assert_eq!(h.rec.state(), DepositState::Start);
}

#[test]
fn test_retrieve_signer_pubkey() {
    let mut h = Harness::new();
    h.initialize();
    h.publish_key(&mainnet_signer_pubkey());

    let out = h.retrieve(T0 + 10).unwrap();

    let key = mainnet_signer_pubkey();
    assert_eq!(h.rec.state(), DepositState::AwaitingBtcFundingProof);
    assert_eq!(h.rec.signing_group_pubkey().x.as_slice(), &key[..32]);
    assert_eq!(h.rec.signing_group_pubkey().y.as_slice(), &key[32..]);
    assert_eq!(h.rec.signing_group_requested_at(), 0);
    assert_eq!(h.rec.funding_proof_timer_start(), T0 + 10);
    assert!(matches!(
        out.events(),
        [DepositEvent::RegisteredPubkey { .. }]
    ));
}

#[test]
fn test_retrieve_before_key_published() {
    let mut h = Harness::new();
    h.initialize();
    let before = h.rec.clone();

    assert_eq!(h.retrieve(T0 + 1), Err(DepositError::PubkeyUnavailable(0)));
    assert_eq!(h.rec, before);
}

#[test]
fn test_retrieve_short_key() {
    let mut h = Harness::new();
    h.initialize();
    h.publish_key(&mainnet_signer_pubkey()[..63]);

    assert_eq!(h.retrieve(T0 + 1), Err(DepositError::PubkeyUnavailable(63)));
}

#[test]
fn test_retrieve_zero_key_leaves_timers() {
    let mut h = Harness::new();
    h.initialize();
    h.publish_key(&[0u8; 64]);
    let before = h.rec.clone();

    let err = h.retrieve(T0 + 1).unwrap_err();
    assert!(matches!(err, DepositError::InvalidPubkey(_)));
    assert_eq!(h.rec, before);
    assert_eq!(h.rec.signing_group_requested_at(), T0);
    assert_eq!(h.rec.funding_proof_timer_start(), 0);
}

#[test]
fn test_retrieve_wrong_state() {
    let mut h = Harness::new();
    assert!(matches!(
        h.retrieve(T0),
        Err(DepositError::WrongState {
            found: DepositState::Start,
            ..
        })
    ));
}

#[test]
fn test_signer_setup_failed_refunds_owner() {
    let mut h = Harness::new();
    h.initialize();
    let keep = h.keep();

    let err = h.notify_setup_failed(T0 + TIMEOUT).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::TimeoutNotElapsed);
    assert_eq!(h.rec.state(), DepositState::AwaitingSignerSetup);

    let out = h.notify_setup_failed(T0 + TIMEOUT + 1).unwrap();
    assert_eq!(h.rec.state(), DepositState::FailedSetup);
    assert_eq!(h.rec.signing_group_requested_at(), 0);
    assert_eq!(h.rec.funding_proof_timer_start(), 0);
    assert_eq!(
        h.logic.withdrawable_amount(&h.rec, &owner()),
        DEFAULT_SETUP_FEE_ESTIMATE
    );
    assert_eq!(h.rec.escrow().locked_with_signers(), NativeAmount::ZERO);
    assert_eq!(h.rec.escrow().total(), DEFAULT_SETUP_FEE_ESTIMATE);
    assert_eq!(h.gateway.bond_held(&keep), NativeAmount::ZERO);
    assert_eq!(
        out.events(),
        &[DepositEvent::SetupFailed {
            deposit: *h.rec.address()
        }]
    );
}

#[test]
fn test_signer_setup_failed_pays_current_holder() {
    let mut h = Harness::new();
    h.initialize();
    let deposit = *h.rec.address();
    h.tokens.transfer(&deposit, stranger());

    h.notify_setup_failed(T0 + TIMEOUT + 1).unwrap();
    assert_eq!(h.logic.withdrawable_amount(&h.rec, &owner()), NativeAmount::ZERO);
    assert_eq!(
        h.logic.withdrawable_amount(&h.rec, &stranger()),
        DEFAULT_SETUP_FEE_ESTIMATE
    );
}

#[test]
fn test_signer_setup_failed_wrong_state() {
    let mut h = Harness::awaiting_proof();
    let err = h.notify_setup_failed(T0 + 10 * TIMEOUT).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::PreconditionViolation);
}

#[test]
fn test_withdraw_funds_once() {
    let mut h = Harness::new();
    h.initialize();
    h.notify_setup_failed(T0 + TIMEOUT + 1).unwrap();

    let err = h
        .logic
        .withdraw_funds(&mut h.rec, &ExecContext::new(T0, stranger()))
        .unwrap_err();
    assert_eq!(err, DepositError::NothingToWithdraw(stranger()));

    let coin = h
        .logic
        .withdraw_funds(&mut h.rec, &Harness::ctx(T0 + TIMEOUT + 2))
        .unwrap();
    assert_eq!(coin.into_amount(), DEFAULT_SETUP_FEE_ESTIMATE);
    assert_eq!(h.rec.escrow().paid_out(), DEFAULT_SETUP_FEE_ESTIMATE);
    assert_eq!(h.rec.escrow().total(), DEFAULT_SETUP_FEE_ESTIMATE);

    let again = h
        .logic
        .withdraw_funds(&mut h.rec, &Harness::ctx(T0 + TIMEOUT + 3));
    assert_eq!(again.unwrap_err(), DepositError::NothingToWithdraw(owner()));
}

#[test]
fn test_provide_funding_proof() {
    let mut h = Harness::awaiting_proof();
    let escrow_before = h.rec.escrow().clone();
    let proved_at = T0 + 600;

    let out = h.prove(proved_at, &mainnet_funding_proof()).unwrap();

    let txid = tbtc_test_utils_btc::txid_le();
    let info = h.rec.funding_info().expect("funding info");
    assert_eq!(h.rec.state(), DepositState::Active);
    assert_eq!(info.value_sats(), tbtc_test_utils_btc::FUNDING_VALUE_SATS);
    assert_eq!(info.value_bytes(), [0x20, 0x40, 0x35, 0x1d, 0, 0, 0, 0]);
    assert_eq!(info.funded_at(), proved_at);
    let outpoint = info.outpoint().to_bytes();
    assert_eq!(&outpoint[..32], &txid);
    assert_eq!(&outpoint[32..], &[0, 0, 0, 0]);
    assert_eq!(h.rec.funding_proof_timer_start(), 0);
    assert_eq!(h.rec.signing_group_requested_at(), proved_at);
    assert_eq!(h.rec.escrow(), &escrow_before);
    assert_eq!(
        out.events(),
        &[DepositEvent::Funded {
            deposit: *h.rec.address(),
            txid: txid.into(),
        }]
    );
}

#[test]
fn test_fabricated_sibling_rejected() {
    let mut h = Harness::awaiting_proof();
    let before = h.rec.clone();
    let mut proof = mainnet_funding_proof();
    proof.merkle_proof[..32].copy_from_slice(&[0x11; 32]);

    let err = h.prove(T0 + 600, &proof).unwrap_err();
    assert!(matches!(
        err,
        DepositError::ProofRejected(SpvError::MerkleMismatch { .. })
    ));
    assert_eq!(err.category(), ErrorCategory::ProofRejected);
    assert_eq!(h.rec, before);
    assert!(h.rec.funding_info().is_none());
}

#[test]
fn test_short_header_chain_rejected() {
    let mut h = Harness::awaiting_proof();
    let before = h.rec.clone();
    let mut proof = mainnet_funding_proof();
    proof.headers.truncate(5 * 80);

    let err = h.prove(T0 + 600, &proof).unwrap_err();
    assert!(matches!(
        err,
        DepositError::ProofRejected(SpvError::InsufficientConfirmations { .. })
    ));
    assert_eq!(h.rec, before);
}

#[test]
fn test_untrusted_difficulty_rejected() {
    let mut h = Harness::awaiting_proof();
    h.relay = StubRelay {
        current: 1,
        previous: 2,
    };

    let err = h.prove(T0 + 600, &mainnet_funding_proof()).unwrap_err();
    assert!(matches!(
        err,
        DepositError::ProofRejected(SpvError::UnexpectedDifficulty { .. })
    ));
}

#[test]
fn test_proof_for_other_signer_rejected() {
    let mut h = Harness::new();
    h.initialize();
    h.publish_key(&unrelated_signer_pubkey());
    h.retrieve(T0 + 10).unwrap();
    let before = h.rec.clone();

    let err = h.prove(T0 + 600, &mainnet_funding_proof()).unwrap_err();
    assert!(matches!(
        err,
        DepositError::NoMatchingFundingOutput { index: 0, .. }
    ));
    assert_eq!(h.rec, before);
}

#[test]
fn test_proof_below_lot_size_rejected() {
    let big_lot = 10 * DEFAULT_LOT_SIZE_SATS;
    let mut h = Harness::new();
    h.system.allowed_lot_sizes.push(big_lot);
    h.initialize_with(big_lot, DEFAULT_SETUP_FEE_ESTIMATE).unwrap();
    h.publish_key(&mainnet_signer_pubkey());
    h.retrieve(T0 + 10).unwrap();

    let err = h.prove(T0 + 600, &mainnet_funding_proof()).unwrap_err();
    assert_eq!(
        err,
        DepositError::NoMatchingFundingOutput {
            index: 0,
            reason: "deposit too small",
        }
    );
    assert_eq!(h.rec.state(), DepositState::AwaitingBtcFundingProof);
}

#[test]
fn test_proof_wrong_state() {
    let mut h = Harness::new();
    h.initialize();
    let err = h.prove(T0 + 600, &mainnet_funding_proof()).unwrap_err();
    assert_eq!(
        err,
        DepositError::WrongState {
            expected: DepositState::AwaitingBtcFundingProof,
            found: DepositState::AwaitingSignerSetup,
        }
    );
}

#[test]
fn test_funding_timed_out() {
    let mut h = Harness::awaiting_proof();
    let timeout = h.logic.params().funding_proof_timeout;
    let start = T0 + 10;

    let err = h.notify_funding_timed_out(start + timeout).unwrap_err();
    assert_eq!(
        err,
        DepositError::TimeoutNotElapsed {
            timer: Timer::FundingProof,
            elapsed: timeout,
            timeout,
        }
    );

    let out = h.notify_funding_timed_out(start + timeout + 1).unwrap();
    assert_eq!(h.rec.state(), DepositState::FailedSetup);
    assert_eq!(h.rec.funding_proof_timer_start(), 0);
    assert_eq!(
        h.rec.escrow().locked_with_signers(),
        DEFAULT_SETUP_FEE_ESTIMATE
    );
    assert!(matches!(out.events(), [DepositEvent::SetupFailed { .. }]));
}

#[test]
fn test_zero_time_initialize_rejected() {
    let mut h = Harness::new();
    let before = h.rec.clone();

    let err = h
        .logic
        .initialize_deposit(
            &mut h.rec,
            &Harness::ctx(0),
            &h.system,
            &mut h.gateway,
            &mut h.tokens,
            DEFAULT_LOT_SIZE_SATS,
            DEFAULT_SETUP_FEE_ESTIMATE,
        )
        .unwrap_err();
    assert_eq!(err, DepositError::ZeroTimestamp);
    assert_eq!(err.category(), ErrorCategory::PreconditionViolation);
    assert_eq!(h.rec, before);
    assert!(h.tokens.is_empty());
    assert_eq!(h.gateway.request_count(), 0);
}

#[test]
fn test_zero_time_retrieve_rejected() {
    let mut h = Harness::new();
    h.initialize();
    h.publish_key(&mainnet_signer_pubkey());
    let before = h.rec.clone();

    assert_eq!(h.retrieve(0), Err(DepositError::ZeroTimestamp));
    assert_eq!(h.rec, before);
    assert_eq!(h.rec.signing_group_requested_at(), T0);
    assert_eq!(h.rec.funding_proof_timer_start(), 0);

    // the deposit can still time out from its real start
    h.notify_setup_failed(T0 + TIMEOUT + 1).unwrap();
    assert_eq!(h.rec.state(), DepositState::FailedSetup);
}

#[test]
fn test_zero_time_proof_rejected() {
    let mut h = Harness::awaiting_proof();
    let before = h.rec.clone();

    assert_eq!(
        h.prove(0, &mainnet_funding_proof()),
        Err(DepositError::ZeroTimestamp)
    );
    assert_eq!(h.rec, before);
}

/// Gateway that hands back twice the bond it holds.
#[derive(Debug, Default)]
struct DoublingGateway {
    inner: StubSigningGroup,
    restored: NativeAmount,
}

impl SigningGroupGateway for DoublingGateway {
    fn request_signing_group(&mut self, deposit: &Address, bond: NativeAmount) -> Address {
        self.inner.request_signing_group(deposit, bond)
    }

    fn public_key(&self, keep: &Address) -> Vec<u8> {
        self.inner.public_key(keep)
    }

    fn return_bond(&mut self, keep: &Address) -> NativeCoin {
        let held = self.inner.return_bond(keep).into_amount();
        NativeCoin::new_unchecked(NativeAmount::new(held.units() * 2))
    }

    fn restore_bond(&mut self, _keep: &Address, coin: NativeCoin) {
        self.restored = self.restored.saturating_add(coin.into_amount());
    }
}

#[test]
fn test_excess_bond_refund_refused() {
    let logic = DepositLogic::new(DepositParams::default());
    let system = StubSystem::default();
    let mut tokens = StubOwnerTokens::default();
    let mut gateway = DoublingGateway::default();
    let mut rec = DepositRecord::new(Address::new([0xde; 20]));

    logic
        .initialize_deposit(
            &mut rec,
            &Harness::ctx(T0),
            &system,
            &mut gateway,
            &mut tokens,
            DEFAULT_LOT_SIZE_SATS,
            DEFAULT_SETUP_FEE_ESTIMATE,
        )
        .unwrap();
    let before = rec.clone();

    let err = logic
        .notify_signer_setup_failed(
            &mut rec,
            &Harness::ctx(T0 + TIMEOUT + 1),
            &mut gateway,
            &tokens,
        )
        .unwrap_err();

    let doubled = NativeAmount::new(DEFAULT_SETUP_FEE_ESTIMATE.units() * 2);
    assert_eq!(
        err,
        DepositError::ExcessBondReturned {
            locked: DEFAULT_SETUP_FEE_ESTIMATE,
            returned: doubled,
        }
    );
    assert_eq!(err.category(), ErrorCategory::PreconditionViolation);
    assert_eq!(rec, before);
    assert_eq!(rec.escrow().total(), DEFAULT_SETUP_FEE_ESTIMATE);
    assert_eq!(logic.withdrawable_amount(&rec, &owner()), NativeAmount::ZERO);
    assert_eq!(gateway.restored, doubled);
}

#[test]
fn test_funder_abort_requires_failed_setup() {
    let mut h = Harness::awaiting_proof();
    let before = h.rec.clone();

    let err = h.request_abort(owner(), &[0x12, 0x34]).unwrap_err();
    assert_eq!(
        err,
        DepositError::FundingNotFailed(DepositState::AwaitingBtcFundingProof)
    );
    assert_eq!(h.rec, before);
}

#[test]
fn test_funder_abort_owner_only() {
    let mut h = Harness::awaiting_proof();
    h.notify_funding_timed_out(T0 + 10 + TIMEOUT + 1).unwrap();

    let err = h.request_abort(stranger(), &[0x01]).unwrap_err();
    assert_eq!(err, DepositError::Unauthorized(stranger()));
    assert_eq!(err.category(), ErrorCategory::AuthorizationFailure);
    assert!(h.rec.funder_abort_script().is_none());

    let script = [0x01, 0x23, 0x45];
    let out = h.request_abort(owner(), &script).unwrap();
    assert_eq!(h.rec.funder_abort_script(), Some(&script[..]));
    assert_eq!(
        out.events(),
        &[DepositEvent::FunderAbortRequested {
            deposit: *h.rec.address(),
            output_script: script.to_vec(),
        }]
    );

    // repeatable, and still moves nothing
    let escrow = h.rec.escrow().clone();
    let out = h.request_abort(owner(), &[0x99]).unwrap();
    assert_eq!(out.events().len(), 1);
    assert_eq!(h.rec.escrow(), &escrow);
    assert_eq!(h.rec.state(), DepositState::FailedSetup);
}

proptest! {
    #[test]
    fn setup_timeout_is_strict(delta in 0u64..=2 * TIMEOUT) {
        let mut h = Harness::new();
        h.initialize();
        let before = h.rec.clone();

        let res = h.notify_setup_failed(T0 + delta);
        if delta > TIMEOUT {
            prop_assert!(res.is_ok());
            prop_assert_eq!(h.rec.state(), DepositState::FailedSetup);
        } else {
            let is_timeout_error = matches!(res, Err(DepositError::TimeoutNotElapsed { .. }));
            prop_assert!(is_timeout_error);
            prop_assert_eq!(&h.rec, &before);
        }
    }

    #[test]
    fn escrow_conserved_through_failed_setup(extra in 0u64..1_000_000_000) {
        let bond = NativeAmount::new(DEFAULT_SETUP_FEE_ESTIMATE.units() + extra);
        let mut h = Harness::new();
        h.initialize_with(DEFAULT_LOT_SIZE_SATS, bond).unwrap();
        prop_assert_eq!(h.rec.escrow().total(), bond);

        h.notify_setup_failed(T0 + TIMEOUT + 1).unwrap();
        prop_assert_eq!(h.rec.escrow().total(), bond);

        let coin = h.logic.withdraw_funds(&mut h.rec, &Harness::ctx(T0 + TIMEOUT + 2)).unwrap();
        prop_assert_eq!(coin.into_amount(), bond);
        prop_assert_eq!(h.rec.escrow().total(), bond);
        prop_assert_eq!(h.rec.escrow().paid_out(), bond);
    }

    #[test]
    fn escrow_conserved_through_funding(extra in 0u64..1_000_000_000) {
        let bond = NativeAmount::new(DEFAULT_SETUP_FEE_ESTIMATE.units() + extra);
        let mut h = Harness::new();
        h.initialize_with(DEFAULT_LOT_SIZE_SATS, bond).unwrap();
        h.publish_key(&mainnet_signer_pubkey());
        h.retrieve(T0 + 10).unwrap();
        prop_assert_eq!(h.rec.escrow().total(), bond);

        h.prove(T0 + 600, &mainnet_funding_proof()).unwrap();
        prop_assert_eq!(h.rec.escrow().total(), bond);
        prop_assert_eq!(h.rec.escrow().locked_with_signers(), bond);
    }
}
