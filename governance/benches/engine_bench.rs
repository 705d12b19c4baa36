use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use civitas_governance::{
    evaluate, DaoParams, GovernanceConfig, GovernanceEngine, Proposal, ProposalConfig,
    ProposalKind, VoteChoice,
};
use civitas_nullables::{NullClock, NullGovernanceStore};
use civitas_transactions::{Transaction, TransactionGroup};
use civitas_types::{Address, AppId, AssetId, Timestamp, TxId};

const APP: AppId = AppId(1);
const GOV: AssetId = AssetId(2);

fn addr(seed: u32) -> Address {
    let mut bytes = [0u8; 32];
    bytes[..4].copy_from_slice(&seed.to_be_bytes());
    bytes[31] = 1;
    Address::new(bytes)
}

fn bench_evaluate(c: &mut Criterion) {
    let proposal = Proposal {
        id: TxId::new([1; 32]),
        name: "bench".into(),
        url: String::new(),
        url_hash: String::new(),
        hash_algo: "sha256".into(),
        voting_start: Timestamp::new(100),
        voting_end: Timestamp::new(500),
        execute_before: Timestamp::new(900),
        kind: ProposalKind::Message {
            message: "m".into(),
        },
        yes: 150,
        no: 20,
        abstain: 3,
        executed: false,
    };

    c.bench_function("evaluate", |b| {
        b.iter(|| evaluate(black_box(&proposal), black_box(Timestamp::new(600)), black_box(100)))
    });
}

fn bench_register_vote(c: &mut Criterion) {
    let mut group = c.benchmark_group("register_vote");

    for voters in [10u32, 100, 1000] {
        group.bench_with_input(BenchmarkId::new("voters", voters), &voters, |b, &voters| {
            b.iter(|| {
                let clock = NullClock::new(10);
                let config = GovernanceConfig::new(
                    APP,
                    addr(u32::MAX),
                    DaoParams {
                        deposit: 1,
                        min_support: 1,
                        min_duration: 1,
                        max_duration: 1000,
                        url: String::new(),
                        dao_name: String::new(),
                        gov_token_id: GOV,
                    },
                );
                let mut engine =
                    GovernanceEngine::initialize(&config, NullGovernanceStore::new(), clock.clone())
                        .unwrap();
                let proposer = addr(0);
                let deposit = TransactionGroup::new(vec![
                    Transaction::app_call(proposer, APP),
                    Transaction::asset_transfer(proposer, GOV, addr(u32::MAX), 1),
                ])
                .unwrap();
                engine
                    .add_proposal(
                        &deposit,
                        ProposalConfig {
                            name: "bench".into(),
                            url: String::new(),
                            url_hash: String::new(),
                            hash_algo: String::new(),
                            voting_start: Timestamp::new(20),
                            voting_end: Timestamp::new(500),
                            execute_before: Timestamp::new(900),
                            kind: ProposalKind::Message {
                                message: "m".into(),
                            },
                        },
                    )
                    .unwrap();
                for i in 1..=voters {
                    let voter = addr(i);
                    let funded = TransactionGroup::new(vec![
                        Transaction::app_call(voter, APP),
                        Transaction::asset_transfer(voter, GOV, addr(u32::MAX), 10),
                    ])
                    .unwrap();
                    engine.deposit_vote_token(&funded).unwrap();
                }
                clock.set(30);
                for i in 1..=voters {
                    let ballot = TransactionGroup::single(Transaction::app_call(addr(i), APP));
                    engine.register_vote(&ballot, &proposer, VoteChoice::Yes).unwrap();
                }
                black_box(engine.proposal(&proposer).unwrap())
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_evaluate, bench_register_vote);
criterion_main!(benches);
