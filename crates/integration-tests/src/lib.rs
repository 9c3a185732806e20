//! Shared fixtures for the workspace integration tests
//!
//! Builders for populated beacon objects of every fork. They return
//! `Result` so the schemas' own validation is what rejects a bad fixture.

use beacon_ssz::types::{self, preset};
use beacon_ssz::{Container, DataVersion, SszError, Value};

pub const PROPOSER_INDEX: u64 = 7;
pub const PARENT_ROOT: [u8; 32] = [0x11; 32];
pub const STATE_ROOT: [u8; 32] = [0x22; 32];
pub const SIGNATURE: [u8; 96] = [0x33; 96];
pub const BLOCK_HASH: [u8; 32] = [0x44; 32];
pub const FEE_RECIPIENT: [u8; 20] = [0x55; 20];
pub const BLOCK_NUMBER: u64 = 19_000_000;

/// `0x`-prefixed hex of a root
#[must_use]
pub fn root_hex(root: &[u8; 32]) -> String {
    format!("0x{}", hex::encode(root))
}

fn missing(container: &Container, field: &str) -> SszError {
    SszError::UnknownField {
        container: container.name().to_string(),
        field: field.to_string(),
    }
}

/// Apply `f` to the container reached by following `path` from `root`,
/// writing every level back so each one is re-validated.
///
/// # Errors
/// Returns an error if a path element is not a container field or `f` fails.
pub fn modify_in<F>(root: &mut Container, path: &[&str], f: F) -> Result<(), SszError>
where
    F: FnOnce(&mut Container) -> Result<(), SszError>,
{
    let Some((head, rest)) = path.split_first() else {
        return f(root);
    };
    let mut child = root
        .get(head)
        .and_then(Value::as_container)
        .cloned()
        .ok_or_else(|| missing(root, head))?;
    modify_in(&mut child, rest, f)?;
    root.set(head, child)
}

/// # Errors
/// Never fails for the built-in validator schema.
pub fn validator(index: u8) -> Result<Container, SszError> {
    let mut credentials = [0u8; 32];
    credentials[0] = 0x02;
    credentials[12..].fill(index);

    Container::default_for(&types::common().validator)
        .with("pubkey", [index; 48])?
        .with("withdrawal_credentials", credentials)?
        .with("effective_balance", 32_000_000_000_u64)?
        .with("activation_eligibility_epoch", u64::from(index))?
        .with("activation_epoch", 10 + u64::from(index))?
        .with("exit_epoch", u64::MAX)?
        .with("withdrawable_epoch", u64::MAX)
}

/// # Errors
/// Never fails for the built-in consolidation request schema.
pub fn consolidation_request(seed: u8) -> Result<Container, SszError> {
    Container::default_for(&types::common().consolidation_request)
        .with("source_address", [seed; 20])?
        .with("source_pubkey", [seed; 48])?
        .with("target_pubkey", [seed.wrapping_add(1); 48])
}

/// A beacon state with `validators` entries and the per-validator lists the
/// fork carries kept the same length.
///
/// # Errors
/// Returns `UnknownField` for a fork without a state schema.
pub fn beacon_state(version: DataVersion, validators: u8) -> Result<Container, SszError> {
    let schema = types::beacon_state(version).ok_or_else(|| SszError::UnknownField {
        container: "BeaconState".to_string(),
        field: version.to_string(),
    })?;
    let mut state = Container::default_for(&schema)
        .with("genesis_time", 1_606_824_023_u64)?
        .with("genesis_validators_root", [0x4b; 32])?
        .with("slot", 8_000_000_u64)?;

    for index in 0..validators {
        state.push("validators", validator(index)?)?;
        state.push("balances", 32_000_000_000_u64 + u64::from(index))?;
        if version.is_at_least(DataVersion::Altair) {
            state.push("previous_epoch_participation", 0b111_u8)?;
            state.push("current_epoch_participation", 0b011_u8)?;
            state.push("inactivity_scores", 0_u64)?;
        }
    }
    if version.has_execution_payload() {
        modify_in(&mut state, &["latest_execution_payload_header"], |header| {
            header.set("block_hash", BLOCK_HASH)?;
            header.set("block_number", BLOCK_NUMBER)
        })?;
    }
    if version.is_at_least(DataVersion::Capella) {
        state.set("next_withdrawal_index", 99_u64)?;
    }
    if version.is_at_least(DataVersion::Electra) {
        let pending = Container::default_for(&types::common().pending_consolidation)
            .with("source_index", 1_u64)?
            .with("target_index", 0_u64)?;
        state.push("pending_consolidations", pending)?;
    }
    if version.is_at_least(DataVersion::Fulu) {
        state.update("proposer_lookahead", |lookahead| {
            if let Value::List(items) = lookahead {
                for (slot, item) in items.iter_mut().enumerate() {
                    *item = Value::Uint64(slot as u64 % 4);
                }
            }
        })?;
    }
    Ok(state)
}

/// A signed block with a populated execution payload (Bellatrix on), one
/// withdrawal (Capella on), one blob commitment (Deneb on) and
/// `consolidations` consolidation requests (Electra on).
///
/// # Errors
/// Returns an error if `consolidations` exceeds the per-payload limit.
pub fn signed_block(version: DataVersion, slot: u64, consolidations: u8) -> Result<Container, SszError> {
    let schema = types::signed_beacon_block(version).ok_or_else(|| SszError::UnknownField {
        container: "SignedBeaconBlock".to_string(),
        field: version.to_string(),
    })?;
    let mut block = Container::default_for(&schema).with("signature", SIGNATURE)?;

    modify_in(&mut block, &["message"], |message| {
        message.set("slot", slot)?;
        message.set("proposer_index", PROPOSER_INDEX)?;
        message.set("parent_root", PARENT_ROOT)?;
        message.set("state_root", STATE_ROOT)
    })?;
    modify_in(&mut block, &["message", "body"], |body| {
        body.set("graffiti", [0x67; 32])?;
        if version.is_at_least(DataVersion::Deneb) {
            body.push("blob_kzg_commitments", [0xc0; 48])?;
        }
        Ok(())
    })?;

    if version.has_execution_payload() {
        modify_in(&mut block, &["message", "body", "execution_payload"], |payload| {
            payload.set("fee_recipient", FEE_RECIPIENT)?;
            payload.set("block_number", BLOCK_NUMBER)?;
            payload.set("block_hash", BLOCK_HASH)?;
            payload.set("base_fee_per_gas", Value::u256_from_be_bytes(u256_be(7)))?;
            payload.push("transactions", Value::bytes(vec![0x02, 0xf8, 0x6c]))?;
            if version.is_at_least(DataVersion::Capella) {
                let withdrawal = Container::default_for(&types::common().withdrawal)
                    .with("index", 5_u64)?
                    .with("validator_index", 3_u64)?
                    .with("address", [0x77; 20])?
                    .with("amount", 1_000_u64)?;
                payload.push("withdrawals", withdrawal)?;
            }
            Ok(())
        })?;
    }

    if version.is_at_least(DataVersion::Electra) {
        modify_in(&mut block, &["message", "body", "execution_requests"], |requests| {
            (0..consolidations).try_for_each(|seed| requests.push("consolidations", consolidation_request(seed)?))
        })?;
    }
    Ok(block)
}

/// Big-endian 256-bit integer holding `value`
#[must_use]
pub fn u256_be(value: u64) -> [u8; 32] {
    let mut be = [0u8; 32];
    be[24..].copy_from_slice(&value.to_be_bytes());
    be
}

/// The blinded counterpart of a full signed block: the execution payload is
/// replaced by its header, whose list fields carry the lists' roots.
///
/// # Errors
/// Returns an error for a fork without blinded blocks or a block that does
/// not match the fork's full schema.
pub fn blind(version: DataVersion, signed: &Container) -> Result<Container, SszError> {
    let unsupported = |name: &str| SszError::UnknownField {
        container: name.to_string(),
        field: version.to_string(),
    };
    let header_schema = types::execution_payload_header(version).ok_or_else(|| unsupported("ExecutionPayloadHeader"))?;
    let body_schema = types::blinded_beacon_block_body(version).ok_or_else(|| unsupported("BlindedBeaconBlockBody"))?;
    let block_schema = types::blinded_beacon_block(version).ok_or_else(|| unsupported("BlindedBeaconBlock"))?;
    let signed_schema =
        types::signed_blinded_beacon_block(version).ok_or_else(|| unsupported("SignedBlindedBeaconBlock"))?;

    let message = signed
        .get("message")
        .and_then(Value::as_container)
        .ok_or_else(|| missing(signed, "message"))?;
    let body = message
        .get("body")
        .and_then(Value::as_container)
        .ok_or_else(|| missing(message, "body"))?;
    let payload = body
        .get("execution_payload")
        .and_then(Value::as_container)
        .ok_or_else(|| missing(body, "execution_payload"))?;

    let mut header_values = Vec::with_capacity(header_schema.field_count());
    for field in header_schema.fields() {
        let value = match field.name {
            "transactions_root" => Value::bytes(payload.field_root("transactions")?),
            "withdrawals_root" => Value::bytes(payload.field_root("withdrawals")?),
            name => payload.get(name).cloned().ok_or_else(|| missing(payload, name))?,
        };
        header_values.push(value);
    }
    let header = Container::new(&header_schema, header_values)?;

    let body_values = body_schema
        .fields()
        .iter()
        .map(|field| match field.name {
            "execution_payload_header" => Ok(Value::Container(header.clone())),
            name => body.get(name).cloned().ok_or_else(|| missing(body, name)),
        })
        .collect::<Result<Vec<_>, _>>()?;
    let blinded_body = Container::new(&body_schema, body_values)?;

    let mut blinded_message = Container::default_for(&block_schema);
    for field in ["slot", "proposer_index", "parent_root", "state_root"] {
        let value = message.get(field).cloned().ok_or_else(|| missing(message, field))?;
        blinded_message.set(field, value)?;
    }
    blinded_message.set("body", blinded_body)?;

    let signature = signed.get("signature").cloned().ok_or_else(|| missing(signed, "signature"))?;
    Container::default_for(&signed_schema)
        .with("message", blinded_message)?
        .with("signature", signature)
}

/// An attestation for `committee`: through `data.index` before Electra and
/// through `committee_bits` from Electra on.
///
/// # Errors
/// Returns an error if `committee` is not below `MAX_COMMITTEES_PER_SLOT`.
pub fn attestation(version: DataVersion, slot: u64, committee: u64) -> Result<Container, SszError> {
    let schema = types::attestation(version).ok_or_else(|| SszError::UnknownField {
        container: "Attestation".to_string(),
        field: version.to_string(),
    })?;
    let electra = version.is_at_least(DataVersion::Electra);

    let checkpoint = Container::default_for(&types::common().checkpoint)
        .with("epoch", slot / preset::SLOTS_PER_EPOCH as u64)?
        .with("root", [0x99; 32])?;
    let data = Container::default_for(&types::common().attestation_data)
        .with("slot", slot)?
        .with("index", if electra { 0 } else { committee })?
        .with("beacon_block_root", [0x98; 32])?
        .with("source", checkpoint.clone())?
        .with("target", checkpoint)?;

    let mut attestation = Container::default_for(&schema)
        .with("aggregation_bits", Value::Bits(vec![true, false, true, true]))?
        .with("data", data)?
        .with("signature", SIGNATURE)?;
    if electra {
        let index = usize::try_from(committee).unwrap_or(usize::MAX);
        if index >= preset::MAX_COMMITTEES_PER_SLOT {
            return Err(SszError::ListTooBig {
                len: index,
                max: preset::MAX_COMMITTEES_PER_SLOT,
            });
        }
        let mut bits = vec![false; preset::MAX_COMMITTEES_PER_SLOT];
        bits[index] = true;
        attestation.set("committee_bits", Value::Bits(bits))?;
    }
    Ok(attestation)
}
