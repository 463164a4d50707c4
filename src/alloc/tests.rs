use crate::alloc::{allocate, Outcome, RomFile};
use crate::plan::{plan, ChipProfile, ChipSize, MenuVariant};
use std::path::PathBuf;

fn rom(name: &str, kb: u64) -> RomFile {
    RomFile::new(PathBuf::from(name), kb * 1024)
}

fn dynamic_profile() -> ChipProfile {
    plan(ChipSize::Kb2048, MenuVariant::DynamicMulti, 32 * 1024).unwrap()
}

fn static_profile() -> ChipProfile {
    plan(ChipSize::Kb2048, MenuVariant::Static3, 512 * 1024).unwrap()
}

#[test]
fn first_fit_in_bank_order() {
    // 100kb lands in bank 0 (480kb free), 450kb skips bank 0 (380kb left)
    // and bank 1 (256kb usable), lands in bank 2, and 50kb backfills bank 0.
    let profile = dynamic_profile();
    let candidates = vec![rom("a.gb", 100), rom("b.gb", 450), rom("c.gb", 50)];
    let allocation = allocate(&profile, &candidates);

    assert_eq!(
        allocation.outcomes(),
        &[Outcome::Accepted(0), Outcome::Accepted(2), Outcome::Accepted(0)]
    );

    let banks = allocation.placement().banks();
    assert_eq!(banks[0].free(), 330 * 1024);
    assert_eq!(banks[2].free(), 62 * 1024);
    assert!(allocation.is_complete());
}

#[test]
fn oversized_rom_is_rejected_outright() {
    // 600kb exceeds the 512kb a fully free bank can offer.
    let profile = dynamic_profile();
    let candidates = vec![rom("big.gb", 600)];
    let allocation = allocate(&profile, &candidates);

    assert_eq!(allocation.outcomes(), &[Outcome::RomTooLarge]);
    assert_eq!(allocation.rejected().collect::<Vec<_>>(), vec![0]);
}

#[test]
fn rejection_leaves_banks_untouched() {
    let profile = dynamic_profile();
    let fresh = allocate(&profile, &[]);
    let candidates = vec![rom("big.gb", 600), rom("small.gb", 100)];
    let allocation = allocate(&profile, &candidates);

    assert_eq!(
        allocation.outcomes(),
        &[Outcome::RomTooLarge, Outcome::Accepted(0)]
    );

    // Only the accepted ROM may have moved any counters.
    for (bank, empty) in allocation
        .placement()
        .banks()
        .iter()
        .zip(fresh.placement().banks())
    {
        let expected = match bank.index() {
            0 => empty.free() - 100 * 1024,
            _ => empty.free(),
        };
        assert_eq!(bank.free(), expected);
    }
}

#[test]
fn exhaustion_is_per_candidate_and_recoverable() {
    // Four 400kb ROMs: bank 0 holds one (480kb free), bank 1 cannot
    // (256kb usable), banks 2 and 3 hold one each, the fourth is rejected
    // without disturbing anything.
    let profile = dynamic_profile();
    let candidates = vec![
        rom("a.gb", 400),
        rom("b.gb", 400),
        rom("c.gb", 400),
        rom("d.gb", 400),
    ];
    let allocation = allocate(&profile, &candidates);

    assert_eq!(
        allocation.outcomes(),
        &[
            Outcome::Accepted(0),
            Outcome::Accepted(2),
            Outcome::Accepted(3),
            Outcome::AllocationExhausted,
        ]
    );
    assert!(!allocation.is_complete());
}

#[test]
fn static3_holds_one_rom_per_game_bank() {
    // Both ROMs would fit bank 1 by byte count, but the static menu expects
    // exactly one game at the start of each bank.
    let profile = static_profile();
    let candidates = vec![rom("a.gb", 100), rom("b.gb", 100)];
    let allocation = allocate(&profile, &candidates);

    assert_eq!(
        allocation.outcomes(),
        &[Outcome::Accepted(1), Outcome::Accepted(2)]
    );
}

#[test]
fn static3_never_assigns_to_the_menu_bank() {
    let profile = static_profile();
    let candidates = vec![
        rom("a.gb", 512),
        rom("b.gb", 512),
        rom("c.gb", 512),
        rom("d.gb", 64),
    ];
    let allocation = allocate(&profile, &candidates);

    assert_eq!(
        allocation.outcomes(),
        &[
            Outcome::Accepted(1),
            Outcome::Accepted(2),
            Outcome::Accepted(3),
            Outcome::AllocationExhausted,
        ]
    );
    assert!(allocation.placement().banks()[0].roms().is_empty());
}

#[test]
fn candidate_order_is_preserved_within_a_bank() {
    let profile = dynamic_profile();
    let candidates = vec![rom("first.gb", 50), rom("second.gb", 30), rom("third.gb", 20)];
    let allocation = allocate(&profile, &candidates);

    let names: Vec<String> = allocation.placement().banks()[0]
        .roms()
        .iter()
        .map(|rom| rom.name())
        .collect();

    assert_eq!(names, vec!["first.gb", "second.gb", "third.gb"]);
}

#[test]
fn no_backtracking_for_earlier_rejections() {
    // The 500kb ROM exhausts every bank it could use before the 10kb ROM is
    // seen; the 10kb ROM still lands in an earlier bank. Single forward
    // pass, by design.
    let profile = dynamic_profile();
    let candidates = vec![
        rom("a.gb", 480),
        rom("b.gb", 500),
        rom("c.gb", 500),
        rom("d.gb", 500),
        rom("e.gb", 10),
    ];
    let allocation = allocate(&profile, &candidates);

    assert_eq!(
        allocation.outcomes(),
        &[
            Outcome::Accepted(0),
            Outcome::Accepted(2),
            Outcome::Accepted(3),
            Outcome::AllocationExhausted,
            Outcome::Accepted(1),
        ]
    );
}

#[test]
fn empty_candidate_list_is_complete() {
    let profile = dynamic_profile();
    let allocation = allocate(&profile, &[]);

    assert!(allocation.is_complete());
    assert_eq!(allocation.rejected().count(), 0);
}
