pub struct Flag;
#[allow(dead_code)]
impl Flag {
    pub const POWER_BOOSTER: u8 = 0b100;
    pub const POWER_REGULATOR: u8 = 0b010;
    pub const POWER_FOLLOWER: u8 = 0b001;
    pub const POWER_ALL_ON: u8 = 0b111;
    pub const RESISTOR_RATIO_PANEL: u8 = 1;
    /// The panel vendor's bring-up sends the ratio-0 command byte (0x20) as
    /// the electronic volume value
    pub const ELECTRONIC_VOLUME_PANEL: u8 = 0x20;
    pub const ELECTRONIC_VOLUME_MAX: u8 = 0x3F;
    pub const BOOSTER_2X_3X_4X: u8 = 0x00;
    pub const BOOSTER_5X: u8 = 0x01;
    pub const BOOSTER_6X: u8 = 0x03;
}
