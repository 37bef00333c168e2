//! OBD-II constants shared by tester and simulator.

/// Functional broadcast request CAN ID (tester → any ECU).
pub const OBD_REQUEST_ID: u32 = 0x7DF;

/// First-ECU response CAN ID.
pub const OBD_RESPONSE_ID: u32 = 0x7E8;

/// Mode 01: show current data.
pub const MODE_CURRENT_DATA: u8 = 0x01;

/// Mode 09: request vehicle information.
pub const MODE_VEHICLE_INFO: u8 = 0x09;

/// PID 0x0C (mode 01): engine RPM.
pub const PID_ENGINE_RPM: u8 = 0x0C;

/// PID 0x0D (mode 01): vehicle speed.
pub const PID_VEHICLE_SPEED: u8 = 0x0D;

/// PID 0x02 (mode 09): vehicle identification number.
pub const PID_VIN: u8 = 0x02;

/// OR-ed into the request mode to form the positive-response SID.
pub const RESPONSE_SID_OFFSET: u8 = 0x40;

/// VIN length per ISO 3779.
pub const VIN_LEN: usize = 17;
