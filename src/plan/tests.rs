use crate::plan::{plan, ChipSize, Error, MenuVariant, BANK_COUNT};

#[test]
fn bank_split_is_exact_for_every_chip() {
    for chip in ChipSize::iter() {
        let profile = plan(chip, MenuVariant::DynamicMulti, 32 * 1024).unwrap();

        assert_eq!(profile.bank_size() * BANK_COUNT as u64, chip.total_bytes());
        assert_eq!(profile.total_size(), chip.total_bytes());
        assert_eq!(profile.banks().len(), BANK_COUNT);
    }
}

#[test]
fn unsupported_chip_sizes_are_rejected() {
    assert_eq!(ChipSize::from_kilobytes(768), Err(Error::InvalidChipSize(768)));
    assert_eq!(ChipSize::from_kilobytes(0), Err(Error::InvalidChipSize(0)));
    assert_eq!(ChipSize::from_kilobytes(2048), Ok(ChipSize::Kb2048));
}

#[test]
fn bootstrap_must_fit_one_bank() {
    // A 512kb chip has 128kb banks; a 256kb menu cannot fit.
    let err = plan(ChipSize::Kb512, MenuVariant::DynamicMulti, 256 * 1024).unwrap_err();

    assert_eq!(
        err,
        Error::BootstrapTooLarge {
            size: 256 * 1024,
            bank_size: 128 * 1024,
        }
    );
}

#[test]
fn static3_reserves_menu_bank_and_caps_game_banks() {
    let profile = plan(ChipSize::Kb2048, MenuVariant::Static3, 512 * 1024).unwrap();
    let banks = profile.banks();

    assert_eq!(banks[0].free(), 0);
    assert_eq!(banks[0].max_roms(), Some(0));

    for bank in &banks[1..] {
        assert_eq!(bank.capacity(), 512 * 1024);
        assert_eq!(bank.reserved(), 0);
        assert_eq!(bank.free(), 512 * 1024);
        assert_eq!(bank.max_roms(), Some(1));
    }
}

#[test]
fn dynamic_multi_reserves_bootstrap_prefix_and_scratch() {
    let profile = plan(ChipSize::Kb2048, MenuVariant::DynamicMulti, 32 * 1024).unwrap();
    let banks = profile.banks();

    assert_eq!(banks[0].reserved(), 32 * 1024);
    assert_eq!(banks[0].free(), 480 * 1024);
    assert_eq!(banks[1].reserved(), 256 * 1024);
    assert_eq!(banks[1].free(), 256 * 1024);
    assert_eq!(banks[2].free(), 512 * 1024);
    assert_eq!(banks[3].free(), 512 * 1024);

    for bank in banks {
        assert_eq!(bank.max_roms(), None);
    }
}

#[test]
fn max_rom_size_is_the_largest_unreserved_bank() {
    let profile = plan(ChipSize::Kb2048, MenuVariant::DynamicMulti, 32 * 1024).unwrap();
    assert_eq!(profile.max_rom_size(), 512 * 1024);

    // Bank 0 is menu-only under Static3 and must not count.
    let profile = plan(ChipSize::Kb2048, MenuVariant::Static3, 512 * 1024).unwrap();
    assert_eq!(profile.max_rom_size(), 512 * 1024);
}

#[test]
fn chip_size_parses_loose_spellings() {
    assert_eq!("512".parse(), Ok(ChipSize::Kb512));
    assert_eq!("1024kb".parse(), Ok(ChipSize::Kb1024));
    assert_eq!("Kb2048".parse(), Ok(ChipSize::Kb2048));
    assert_eq!("4096".parse::<ChipSize>(), Err(()));
}

#[test]
fn menu_variant_parses_loose_spellings() {
    assert_eq!("static3".parse(), Ok(MenuVariant::Static3));
    assert_eq!("DynamicMulti".parse(), Ok(MenuVariant::DynamicMulti));
    assert_eq!("dynamic".parse(), Ok(MenuVariant::DynamicMulti));
    assert_eq!("mbc5".parse::<MenuVariant>(), Err(()));
}
