use crate::{BoardGeneration, GpioError, GpioResult};

/// Mapping from physical position of pins on the Raspberry Pi header to kernel GPIO line numbers,
/// for the first board generation (revision codes below `0x0004`, 26-pin header).
///
/// Header positions that are not listed here (power, ground) are not valid pins.
pub const GEN1_PINS: &[(u8, u32)] = &[
    (3, 0),
    (5, 1),
    (7, 4),
    (8, 14),
    (10, 15),
    (11, 17),
    (12, 18),
    (13, 21),
    (15, 22),
    (16, 23),
    (18, 24),
    (19, 10),
    (21, 9),
    (22, 25),
    (23, 11),
    (24, 8),
    (26, 7),
];

/// Same mapping for every later board (26-pin rev 2 and all 40-pin headers).
pub const GEN2_PINS: &[(u8, u32)] = &[
    (3, 2),
    (5, 3),
    (7, 4),
    (8, 14),
    (10, 15),
    (11, 17),
    (12, 18),
    (13, 27),
    (15, 22),
    (16, 23),
    (18, 24),
    (19, 10),
    (21, 9),
    (22, 25),
    (23, 11),
    (24, 8),
    (26, 7),
    (29, 5),
    (31, 6),
    (32, 12),
    (33, 13),
    (35, 19),
    (36, 16),
    (37, 26),
    (38, 20),
    (40, 21),
];

fn table(generation: BoardGeneration) -> &'static [(u8, u32)] {
    match generation {
        BoardGeneration::Gen1 => GEN1_PINS,
        BoardGeneration::Gen2 => GEN2_PINS,
    }
}

/// Kernel line number of `header_pin` on a board of the given generation.
///
/// Fails with a resolution error naming the pin when the position has no GPIO line.
pub fn resolve(generation: BoardGeneration, header_pin: u8) -> GpioResult<u32> {
    table(generation)
        .iter()
        .find(|(pin, _)| *pin == header_pin)
        .map(|(_, line)| *line)
        .ok_or_else(|| GpioError::unknown_pin(header_pin, generation))
}

/// Header positions carrying a GPIO line, in ascending order.
pub fn header_pins(generation: BoardGeneration) -> impl Iterator<Item = u8> {
    table(generation).iter().map(|(pin, _)| *pin)
}
