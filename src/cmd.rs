pub struct Cmd;
#[allow(dead_code)]
impl Cmd {
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const START_LINE_SET: u8 = 0x40;
    pub const PAGE_ADDRESS_SET: u8 = 0xB0;
    pub const COLUMN_MSB: u8 = 0x10;
    pub const COLUMN_LSB: u8 = 0x00;
    pub const ADC_NORMAL: u8 = 0xA0;
    pub const ADC_REVERSE: u8 = 0xA1;
    pub const DISPLAY_NORMAL: u8 = 0xA6;
    pub const DISPLAY_REVERSE: u8 = 0xA7;
    pub const ALL_POINTS_OFF: u8 = 0xA4;
    pub const ALL_POINTS_ON: u8 = 0xA5;
    // bias ratios at the 1/33 duty of a 32 line panel
    pub const LCD_BIAS_1_DIV_6: u8 = 0xA2;
    pub const LCD_BIAS_1_DIV_5: u8 = 0xA3;
    pub const NORMAL_SCAN_DIRECTION: u8 = 0xC0;
    pub const REVERSE_SCAN_DIRECTION: u8 = 0xC8;
    pub const RESISTOR_RATIO_SET: u8 = 0x20;
    pub const POWER_CONTROL_SET: u8 = 0x28;
    pub const ELECTRONIC_VOLUME_MODE_SET: u8 = 0x81;
    pub const SLEEP_MODE: u8 = 0xAC;
    pub const NORMAL_MODE: u8 = 0xAD;
    pub const RESET: u8 = 0xE2;
    pub const NOP: u8 = 0xE3;
    pub const READ_MODIFY_WRITE: u8 = 0xE0;
    pub const END: u8 = 0xEE;
    pub const BOOSTER_RATIO_SET: u8 = 0xF8;
}

/// Select the display RAM line shown at the top of the panel (0..=63)
pub const fn start_line(line: u8) -> u8 {
    Cmd::START_LINE_SET | (line & 0x3F)
}

/// Select a page (band of 8 pixel rows)
pub const fn page_address(page: u8) -> u8 {
    Cmd::PAGE_ADDRESS_SET | (page & 0x0F)
}

/// Upper nibble of the column address
pub const fn column_msb(column: u8) -> u8 {
    Cmd::COLUMN_MSB | (column >> 4)
}

/// Lower nibble of the column address
pub const fn column_lsb(column: u8) -> u8 {
    Cmd::COLUMN_LSB | (column & 0x0F)
}

/// V0 voltage regulator internal resistor ratio (0..=7)
pub const fn resistor_ratio(ratio: u8) -> u8 {
    Cmd::RESISTOR_RATIO_SET | (ratio & 0x07)
}

/// Power control: booster, regulator and follower bits
pub const fn power_control(circuits: u8) -> u8 {
    Cmd::POWER_CONTROL_SET | (circuits & 0x07)
}

pub const fn display_on(on: bool) -> u8 {
    if on {
        Cmd::DISPLAY_ON
    } else {
        Cmd::DISPLAY_OFF
    }
}

pub const fn display_reverse(inverted: bool) -> u8 {
    if inverted {
        Cmd::DISPLAY_REVERSE
    } else {
        Cmd::DISPLAY_NORMAL
    }
}

pub const fn all_points(on: bool) -> u8 {
    if on {
        Cmd::ALL_POINTS_ON
    } else {
        Cmd::ALL_POINTS_OFF
    }
}
