use std::{collections::BTreeMap, sync::Arc};

use tbtc_deposit::{
    DepositLogic, DepositRecord, DepositResult, ExecContext, ExecOutput, NativeCoin,
    OwnerTokenRegistry, SigningGroupGateway, SystemRegistry,
};
use tbtc_primitives::{Address, NativeAmount};
use tracing::*;

use crate::{
    errors::{FactoryError, FactoryResult},
    index::CloneIndex,
    log::{CloneCreated, EventLog, FactoryEvent},
};

/// Creates deposits sharing one logic and keeps their records apart.
///
/// The factory's own record is the template. It can be driven through the
/// lifecycle like any deposit, but new deposits always start from a fresh
/// record and never see it.
#[derive(Debug)]
pub struct DepositFactory {
    address: Address,
    logic: Arc<DepositLogic>,
    template: DepositRecord,
    deposits: BTreeMap<Address, DepositRecord>,
    nonce: u64,
    index: CloneIndex,
    log: EventLog,
}

impl DepositFactory {
    pub fn new(address: Address, logic: DepositLogic) -> Self {
        Self {
            address,
            logic: Arc::new(logic),
            template: DepositRecord::new(address),
            deposits: BTreeMap::new(),
            nonce: 0,
            index: CloneIndex::new_empty(),
            log: EventLog::new_empty(),
        }
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn logic(&self) -> &Arc<DepositLogic> {
        &self.logic
    }

    pub fn template(&self) -> &DepositRecord {
        &self.template
    }

    pub fn deposit(&self, deposit: &Address) -> Option<&DepositRecord> {
        self.deposits.get(deposit)
    }

    pub fn index(&self) -> &CloneIndex {
        &self.index
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    /// Allocates a new deposit and initializes it on behalf of `ctx.caller()`.
    ///
    /// Nothing is allocated or logged if initialization fails.
    pub fn create_deposit(
        &mut self,
        ctx: &ExecContext,
        system: &impl SystemRegistry,
        gateway: &mut impl SigningGroupGateway,
        tokens: &mut impl OwnerTokenRegistry,
        lot_size_sats: u64,
        bond: NativeAmount,
    ) -> FactoryResult<Address> {
        let deposit = self.address.derive_child(self.nonce);
        if deposit == self.address || self.deposits.contains_key(&deposit) {
            return Err(FactoryError::AddressTaken(deposit));
        }

        let mut rec = DepositRecord::new(deposit);
        let out = self.logic.initialize_deposit(
            &mut rec,
            ctx,
            system,
            gateway,
            tokens,
            lot_size_sats,
            bond,
        )?;

        self.nonce += 1;
        self.deposits.insert(deposit, rec);

        let created = CloneCreated {
            deposit,
            logic_version: self.logic.version(),
            lot_size_sats,
        };
        let seq = self.log.append(
            ctx.timestamp(),
            self.address,
            FactoryEvent::CloneCreated(created),
        );
        if let Some(entry) = self.log.entries().get(seq as usize) {
            self.index.observe(entry);
        }
        self.append_output(ctx.timestamp(), deposit, out);

        info!(%deposit, lot_size_sats, "created deposit");
        Ok(deposit)
    }

    /// Runs `op` against the record at `deposit`.
    ///
    /// The op works on a scratch copy that only replaces the stored record if
    /// the op succeeds.
    pub fn execute<F>(&mut self, deposit: &Address, ctx: &ExecContext, op: F) -> FactoryResult<()>
    where
        F: FnOnce(&DepositLogic, &mut DepositRecord, &ExecContext) -> DepositResult<ExecOutput>,
    {
        let stored = self
            .deposits
            .get_mut(deposit)
            .ok_or(FactoryError::UnknownDeposit(*deposit))?;
        let mut scratch = stored.clone();
        let out = op(&self.logic, &mut scratch, ctx)?;
        *stored = scratch;
        self.append_output(ctx.timestamp(), *deposit, out);
        Ok(())
    }

    /// Runs `op` against the template record.
    pub fn execute_on_template<F>(&mut self, ctx: &ExecContext, op: F) -> FactoryResult<()>
    where
        F: FnOnce(&DepositLogic, &mut DepositRecord, &ExecContext) -> DepositResult<ExecOutput>,
    {
        let mut scratch = self.template.clone();
        let out = op(&self.logic, &mut scratch, ctx)?;
        self.template = scratch;
        self.append_output(ctx.timestamp(), self.address, out);
        Ok(())
    }

    /// Pays out whatever `ctx.caller()` can withdraw from `deposit`.
    pub fn withdraw_funds(&mut self, deposit: &Address, ctx: &ExecContext) -> FactoryResult<NativeCoin> {
        let rec = self
            .deposits
            .get_mut(deposit)
            .ok_or(FactoryError::UnknownDeposit(*deposit))?;
        Ok(self.logic.withdraw_funds(rec, ctx)?)
    }

    fn append_output(&mut self, timestamp: u64, source: Address, out: ExecOutput) {
        for ev in out.into_events() {
            self.log
                .append(timestamp, source, FactoryEvent::Deposit(ev));
        }
    }
}
