//! Wire level tests of the SPI backend, seen from outside the crate.

use embedded_hal_mock::eh1::delay::NoopDelay;
use embedded_hal_mock::eh1::digital::{
    Mock as PinMock, State as PinState, Transaction as PinTransaction,
};
use embedded_hal_mock::eh1::spi::{Mock as SpiMock, Transaction as SpiTransaction};
use st7565r::driver::InitStep;
use st7565r::prelude::*;

/// One `SpiDevice::write` call as the mock sees it
fn spi_write(data: &[u8]) -> [SpiTransaction<u8>; 3] {
    [
        SpiTransaction::transaction_start(),
        SpiTransaction::write_vec(data.to_vec()),
        SpiTransaction::transaction_end(),
    ]
}

fn flatten(writes: &[[SpiTransaction<u8>; 3]]) -> Vec<SpiTransaction<u8>> {
    writes.iter().flat_map(|w| w.iter().cloned()).collect()
}

fn idle_pin() -> PinMock {
    PinMock::new(&[])
}

#[test]
fn commands_and_data_toggle_a0() {
    let mut spi = SpiMock::new(&flatten(&[spi_write(&[0xAF]), spi_write(&[0x01, 0x80])]));
    let mut a0 = PinMock::new(&[
        PinTransaction::set(PinState::Low),
        PinTransaction::set(PinState::High),
    ]);
    let mut rst = idle_pin();

    let mut interface = SpiDisplayInterface::new(spi.clone(), a0.clone(), rst.clone());
    interface.cmd(0xAF).unwrap();
    interface.data(&[0x01, 0x80]).unwrap();

    spi.done();
    a0.done();
    rst.done();
}

#[test]
fn hard_reset_pulses_res_low() {
    let mut spi = SpiMock::new(&[]);
    let mut a0 = idle_pin();
    let mut rst = PinMock::new(&[
        PinTransaction::set(PinState::Low),
        PinTransaction::set(PinState::High),
    ]);

    let mut interface = SpiDisplayInterface::new(spi.clone(), a0.clone(), rst.clone());
    interface.hard_reset(&mut NoopDelay).unwrap();

    spi.done();
    a0.done();
    rst.done();
}

#[test]
fn setup_then_immediate_pixel() {
    static RESET_ONLY: &[InitStep] = &[InitStep::HardReset];

    // blank frame written by setup
    let mut writes = vec![spi_write(&[0xAE, 0x40])];
    let mut a0_levels = vec![PinState::Low];
    for page in 0..4u8 {
        writes.push(spi_write(&[0xB0 | page, 0x10, 0x00]));
        writes.push(spi_write(&[0x00; 128]));
        a0_levels.extend([PinState::Low, PinState::High]);
    }
    writes.push(spi_write(&[0xAF]));
    a0_levels.push(PinState::Low);

    // pixel (10, 17) lives in page 2, column 10, bit 1
    writes.push(spi_write(&[0xAE, 0xB2, 0x10, 0x0A]));
    writes.push(spi_write(&[0x02]));
    writes.push(spi_write(&[0xAF]));
    a0_levels.extend([PinState::Low, PinState::High, PinState::Low]);

    let a0_expectations: Vec<_> = a0_levels.into_iter().map(PinTransaction::set).collect();
    let mut spi = SpiMock::new(&flatten(&writes));
    let mut a0 = PinMock::new(&a0_expectations);
    let mut rst = PinMock::new(&[
        PinTransaction::set(PinState::Low),
        PinTransaction::set(PinState::High),
    ]);

    let interface = SpiDisplayInterface::new(spi.clone(), a0.clone(), rst.clone());
    let config = Config::default()
        .with_update_mode(UpdateMode::Immediate)
        .with_init_sequence(RESET_ONLY);
    let mut display = St7565r::new(interface, config);
    display.setup(&mut NoopDelay).unwrap();
    display.paint_pixel(Color::On, 10, 17).unwrap();
    assert_eq!(display.pixel(10, 17), Some(Color::On));

    spi.done();
    a0.done();
    rst.done();
}

#[test]
fn deferred_paint_stays_off_the_wire_until_update() {
    static NOTHING: &[InitStep] = &[];

    let mut writes = vec![spi_write(&[0xAE, 0x40])];
    let mut a0_levels = vec![PinState::Low];
    for page in 0..4u8 {
        writes.push(spi_write(&[0xB0 | page, 0x10, 0x00]));
        writes.push(spi_write(&[0x00; 128]));
        a0_levels.extend([PinState::Low, PinState::High]);
    }
    writes.push(spi_write(&[0xAF]));
    a0_levels.push(PinState::Low);

    // one changed byte: off, page 0, column 127, data, on
    writes.push(spi_write(&[0xAE]));
    writes.push(spi_write(&[0xB0]));
    writes.push(spi_write(&[0x17, 0x0F]));
    writes.push(spi_write(&[0x80]));
    writes.push(spi_write(&[0xAF]));
    a0_levels.extend([
        PinState::Low,
        PinState::Low,
        PinState::Low,
        PinState::High,
        PinState::Low,
    ]);

    let a0_expectations: Vec<_> = a0_levels.into_iter().map(PinTransaction::set).collect();
    let mut spi = SpiMock::new(&flatten(&writes));
    let mut a0 = PinMock::new(&a0_expectations);
    let mut rst = idle_pin();

    let interface = SpiDisplayInterface::new(spi.clone(), a0.clone(), rst.clone());
    let mut display = St7565r::new(interface, Config::default().with_init_sequence(NOTHING));
    display.setup(&mut NoopDelay).unwrap();
    display.paint_pixel(Color::On, 127, 7).unwrap();
    assert_eq!(display.update_display().unwrap(), 1);
    assert_eq!(display.update_display().unwrap(), 0);

    spi.done();
    a0.done();
    rst.done();
}

#[test]
fn rejected_paint_sends_nothing() {
    let mut spi = SpiMock::new(&[]);
    let mut a0 = idle_pin();
    let mut rst = idle_pin();

    let interface = SpiDisplayInterface::new(spi.clone(), a0.clone(), rst.clone());
    let mut display = St7565r::new(interface, Config::default());
    assert!(matches!(
        display.paint_rectangle(Color::On, 120, 0, 16, 4),
        Err(Error::OutOfBounds)
    ));
    assert!(matches!(
        display.update_display(),
        Err(Error::NotInitialized)
    ));

    spi.done();
    a0.done();
    rst.done();
}
