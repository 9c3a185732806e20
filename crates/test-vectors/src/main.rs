//! Test Vector Generator
//!
//! Generates JSON test vectors (encodings, hash tree roots and Merkle proofs)
//! for the beacon objects of each fork, for cross-checking other SSZ
//! implementations.

use anyhow::{Context, Result};
use beacon_ssz::gindex::PathElement;
use beacon_ssz::{types, Container, DataVersion, ProofBundle, Value, VersionedBeaconState, VersionedSignedBeaconBlock};
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "generate-test-vectors")]
#[command(about = "Generate SSZ test vectors for beacon chain objects")]
struct Args {
    /// Output directory for test vectors
    #[arg(short, long, env = "TEST_VECTORS_OUT", default_value = "test-vectors")]
    output: PathBuf,

    /// Forks to generate, comma separated (default: all)
    #[arg(long, env = "TEST_VECTORS_FORKS", value_delimiter = ',')]
    forks: Vec<DataVersion>,

    /// Number of validators in the sample state
    #[arg(long, default_value = "4")]
    num_validators: usize,
}

/// Test vector file format, one per fork
#[derive(Debug, Serialize)]
struct TestVectorFile {
    fork: DataVersion,
    /// Preset the schemas were built with (minimal or mainnet)
    preset: &'static str,
    state: ObjectVector,
    block: ObjectVector,
    proofs: Vec<NamedProof>,
}

#[derive(Debug, Serialize)]
struct ObjectVector {
    schema: String,
    root: String,
    size: usize,
    /// Omitted for objects too large to be useful inline
    #[serde(skip_serializing_if = "Option::is_none")]
    ssz: Option<String>,
}

#[derive(Debug, Serialize)]
struct NamedProof {
    object: &'static str,
    path: String,
    #[serde(flatten)]
    bundle: ProofBundle,
}

const PRESET: &str = if cfg!(feature = "minimal") { "minimal" } else { "mainnet" };

fn hex0x(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// `validators[0].withdrawal_credentials` style rendering of a path
fn render(path: &[PathElement]) -> String {
    let mut out = String::new();
    for element in path {
        match element {
            PathElement::Index(_) => {}
            _ if !out.is_empty() => out.push('.'),
            _ => {}
        }
        out.push_str(&element.to_string());
    }
    out
}

fn sample_validator(index: usize) -> Result<Container> {
    let byte = u8::try_from(index % 256)?;
    let mut credentials = [0u8; 32];
    credentials[0] = 0x01;
    credentials[12..].fill(byte.wrapping_add(0xa0));

    Ok(Container::default_for(&types::common().validator)
        .with("pubkey", [byte; 48])?
        .with("withdrawal_credentials", credentials)?
        .with("effective_balance", 32_000_000_000_u64)?
        .with("activation_epoch", index as u64)?
        .with("exit_epoch", u64::MAX)?
        .with("withdrawable_epoch", u64::MAX)?)
}

fn sample_state(version: DataVersion, num_validators: usize) -> Result<Container> {
    let schema = types::beacon_state(version).context("fork has no beacon state schema")?;
    let mut state = Container::default_for(&schema).with("slot", 1000_u64)?;

    for index in 0..num_validators {
        state.push("validators", sample_validator(index)?)?;
        state.push("balances", 32_000_000_000_u64 + index as u64)?;
        if version.is_at_least(DataVersion::Altair) {
            state.push("previous_epoch_participation", 0b111_u8)?;
            state.push("current_epoch_participation", 0_u8)?;
            state.push("inactivity_scores", 0_u64)?;
        }
    }

    if version.is_at_least(DataVersion::Electra) && num_validators >= 2 {
        let consolidation = Container::default_for(&types::common().pending_consolidation)
            .with("source_index", 1_u64)?
            .with("target_index", 0_u64)?;
        state.push("pending_consolidations", consolidation)?;
    }
    Ok(state)
}

fn sample_block(version: DataVersion, state_root: [u8; 32]) -> Result<Container> {
    let schema = types::signed_beacon_block(version).context("fork has no block schema")?;
    let mut block = Container::default_for(&schema);
    let mut message = block
        .get("message")
        .and_then(Value::as_container)
        .cloned()
        .context("block has no message")?;
    message.set("slot", 1001_u64)?;
    message.set("proposer_index", 3_u64)?;
    message.set("parent_root", [0x11; 32])?;
    message.set("state_root", state_root)?;
    block.set("message", message)?;
    block.set("signature", [0x22; 96])?;
    Ok(block)
}

fn state_paths(version: DataVersion, num_validators: usize) -> Vec<Vec<PathElement>> {
    let mut paths = vec![
        vec!["slot".into()],
        vec!["latest_block_header".into(), "state_root".into()],
        vec!["validators".into(), PathElement::Length],
    ];
    if num_validators > 0 {
        let last = num_validators - 1;
        paths.push(vec!["validators".into(), last.into(), "withdrawal_credentials".into()]);
        paths.push(vec!["validators".into(), 0usize.into(), "activation_epoch".into()]);
        paths.push(vec!["balances".into(), last.into()]);
    }
    if version.is_at_least(DataVersion::Electra) && num_validators >= 2 {
        paths.push(vec!["pending_consolidations".into(), 0usize.into(), "source_index".into()]);
    }
    if version.is_at_least(DataVersion::Fulu) {
        paths.push(vec!["proposer_lookahead".into(), 0usize.into()]);
    }
    paths
}

fn block_paths(version: DataVersion) -> Vec<Vec<PathElement>> {
    let mut paths = vec![
        vec!["message".into(), "slot".into()],
        vec!["message".into(), "state_root".into()],
    ];
    if version.has_execution_payload() {
        paths.push(vec![
            "message".into(),
            "body".into(),
            "execution_payload".into(),
            "block_hash".into(),
        ]);
    }
    paths
}

fn prove_all(
    object: &'static str,
    container: &Container,
    paths: Vec<Vec<PathElement>>,
) -> Result<Vec<NamedProof>> {
    paths
        .into_iter()
        .map(|path| {
            let bundle = container
                .prove_path(&path)
                .with_context(|| format!("proving {}", render(&path)))?;
            anyhow::ensure!(bundle.verify(), "proof for {} does not verify", render(&path));
            Ok(NamedProof {
                object,
                path: render(&path),
                bundle,
            })
        })
        .collect()
}

fn generate(version: DataVersion, num_validators: usize) -> Result<TestVectorFile> {
    let state = VersionedBeaconState::new(version, sample_state(version, num_validators)?)?;
    let state_root = state.hash_tree_root()?;
    let block = VersionedSignedBeaconBlock::new(version, sample_block(version, state_root)?)?;

    let state_data = state.data()?;
    let block_data = block.data()?;

    let mut proofs = prove_all("state", state_data, state_paths(version, num_validators))?;
    proofs.extend(prove_all("block", block_data, block_paths(version))?);

    tracing::debug!(%version, proofs = proofs.len(), "generated fork vectors");

    Ok(TestVectorFile {
        fork: version,
        preset: PRESET,
        state: ObjectVector {
            schema: state_data.name().to_string(),
            root: hex0x(&state_root),
            size: state_data.size_ssz()?,
            ssz: None,
        },
        block: ObjectVector {
            schema: block_data.name().to_string(),
            root: hex0x(&block.block_root()?),
            size: block_data.size_ssz()?,
            ssz: Some(hex0x(&block.to_ssz()?)),
        },
        proofs,
    })
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let forks = if args.forks.is_empty() {
        DataVersion::ALL.to_vec()
    } else {
        args.forks
    };

    tracing::info!(
        output = %args.output.display(),
        forks = forks.len(),
        validators = args.num_validators,
        preset = PRESET,
        "Generating test vectors"
    );

    // Ensure output directory exists
    std::fs::create_dir_all(&args.output)?;

    for version in forks {
        let vectors = generate(version, args.num_validators)
            .with_context(|| format!("generating {version} vectors"))?;
        let output_path = args.output.join(format!("{version}.json"));
        let json = serde_json::to_string_pretty(&vectors)?;
        std::fs::write(&output_path, json)?;

        tracing::info!(path = %output_path.display(), "Wrote test vectors");
    }

    Ok(())
}
