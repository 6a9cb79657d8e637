//! General Instrument AY-3-8910 Programmable Sound Generator channel engine.
//!
//! Three square-wave tone generators, a shared noise generator and a
//! per-channel mixer, summed to mono and written as interleaved stereo
//! `i16` pairs. Synthesis runs once per output sample pair: every phase
//! counter advances by a base step derived from the chip clock and the host
//! sample rate, and a generator flips when its counter passes its step.
//!
//! # Register map (16 registers)
//!
//! | Reg | Name      | Bits | Effect                          |
//! |-----|-----------|------|---------------------------------|
//! | R0  | A fine    | 7-0  | tone step A                     |
//! | R1  | A coarse  | 7-0  | tone step A                     |
//! | R2  | B fine    | 7-0  | tone step B                     |
//! | R3  | B coarse  | 7-0  | tone step B                     |
//! | R4  | C fine    | 7-0  | tone step C                     |
//! | R5  | C coarse  | 7-0  | tone step C                     |
//! | R6  | Noise     | 4-0  | noise step                      |
//! | R7  | Mixer     | 5-0  | tone/noise gates, 0 = enabled   |
//! | R8  | A volume  | 4-0  | volume A, bit 4 = envelope      |
//! | R9  | B volume  | 4-0  | volume B, bit 4 = envelope      |
//! | R10 | C volume  | 4-0  | volume C, bit 4 = envelope      |
//! | R11 | Env fine  | 7-0  | stored only                     |
//! | R12 | Env coarse| 7-0  | stored only                     |
//! | R13 | Env shape | 3-0  | stored only                     |
//! | R14 | Port A    | 7-0  | stored only                     |
//! | R15 | Port B    | 7-0  | stored only                     |
//!
//! The envelope generator is not modelled: its registers are accepted and
//! read back, and the per-channel envelope flag is tracked, but output
//! volume always comes from the fixed volume bits.

mod error;

pub use error::PsgError;

use emu_core::{AudioChannel, Observable, RegisterDevice, Value};

/// 4 MHz chip clock.
pub const CLOCK_4MHZ: u32 = 4_000_000;
/// NTSC colourburst chip clock (3.579545 MHz), the power-on default.
pub const CLOCK_3_58MHZ: u32 = 3_579_545;
/// Host sample rate assumed by [`PsgConfig::default`].
pub const SAMPLE_FREQUENCY: u32 = 44_100;

/// Number of addressable registers.
pub const REGISTERS: usize = 16;

/// Left shift applied to a 12+ bit period to form a phase step.
pub const STEP_BIAS: u32 = 18;
/// Fixed-point scale of the base step.
const CLOCK_BIAS: u64 = 16_000;
/// Left shift applied to a volume table entry.
const VOLUME_BIAS: u32 = 5;

const NOISE_PERIOD_MASK: u8 = 0x1F;
const VOLUME_MASK: u8 = 0x0F;
const ENVELOPE_FLAG: u8 = 0x10;

const MIXER_TONE: [u8; 3] = [0x01, 0x02, 0x04];
const MIXER_NOISE: [u8; 3] = [0x08, 0x10, 0x20];

/// LFSR seed after power-on.
const DEFAULT_SEED: u16 = 0xFFFF;
/// LFSR taps: bits 0 and 3.
const SEED_TAP_MASK: u16 = 0x0009;
const SEED_TAP_SHIFT: u32 = 3;
const SEED_FEEDBACK_SHIFT: u32 = 15;

/// Logarithmic attenuation curve. A 4-bit volume `v` reads entry `v * 2`.
const VOLUME_TABLE: [i16; 32] = [
    0x00, 0x01, 0x01, 0x02, 0x02, 0x03, 0x03, 0x04,
    0x05, 0x06, 0x07, 0x09, 0x0B, 0x0D, 0x0F, 0x12,
    0x16, 0x1A, 0x1F, 0x25, 0x2D, 0x35, 0x3F, 0x4C,
    0x5A, 0x6A, 0x7F, 0x97, 0xB4, 0xD6, 0xFF, 0xFF,
];

/// Register image written at construction, as (register, value) in write
/// order.
const DEFAULT_REGISTERS: [(usize, u8); 14] = [
    (1, 0x00),
    (0, 0x55),
    (3, 0x00),
    (2, 0x00),
    (5, 0x00),
    (4, 0x00),
    (6, 0x00),
    (7, 0xB8),
    (8, 0x00),
    (9, 0x00),
    (10, 0x00),
    (11, 0x0B),
    (12, 0x00),
    (13, 0x00),
];

/// Chip clock and host sample rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PsgConfig {
    /// Chip input clock in Hz.
    pub clock_hz: u32,
    /// Host output rate in sample pairs per second.
    pub sample_rate: u32,
}

impl Default for PsgConfig {
    fn default() -> Self {
        Self {
            clock_hz: CLOCK_3_58MHZ,
            sample_rate: SAMPLE_FREQUENCY,
        }
    }
}

/// Square-wave phase accumulator for one channel.
#[derive(Debug, Clone, Copy)]
struct ToneGenerator {
    /// Scaled period: `((coarse << 8) | fine) << STEP_BIAS`.
    step: u64,
    counter: u64,
    /// Current half of the square wave.
    active: bool,
}

impl ToneGenerator {
    fn new() -> Self {
        Self {
            step: 0,
            counter: 0,
            active: true,
        }
    }

    /// Advance by one sample pair and return the wave state.
    fn advance(&mut self, base_step: u64) -> bool {
        self.counter += base_step;
        if self.counter > self.step {
            self.counter -= self.step;
            self.active = !self.active;
        }
        self.active
    }
}

/// Shared noise source: a 16-bit LFSR clocked by its own phase counter.
#[derive(Debug, Clone, Copy)]
struct NoiseGenerator {
    /// Never below the base step.
    step: u64,
    counter: u64,
    /// Non-zero for the lifetime of the chip.
    seed: u16,
}

impl NoiseGenerator {
    fn new() -> Self {
        Self {
            step: 0,
            counter: 0,
            seed: DEFAULT_SEED,
        }
    }

    /// Advance by one sample pair and return the current noise bit.
    fn advance(&mut self, base_step: u64) -> bool {
        self.counter += base_step;
        if self.counter > self.step {
            self.shift();
            self.counter -= self.step;
        }
        self.seed & 1 != 0
    }

    /// Feed bit 0 XOR bit 3 back into bit 15.
    fn shift(&mut self) {
        let taps = self.seed & SEED_TAP_MASK;
        let feedback = (taps ^ (taps >> SEED_TAP_SHIFT)) & 1;
        self.seed = (self.seed >> 1) | (feedback << SEED_FEEDBACK_SHIFT);
    }
}

/// Per-channel state derived from the volume and mixer registers.
#[derive(Debug, Clone, Copy)]
struct Channel {
    tone: ToneGenerator,
    /// Scaled volume added to the output when the channel sounds.
    volume: i16,
    /// Volume register bit 4. Tracked but not modelled.
    envelope: bool,
    tone_enabled: bool,
    noise_enabled: bool,
}

impl Channel {
    fn new() -> Self {
        Self {
            tone: ToneGenerator::new(),
            volume: 0,
            envelope: false,
            tone_enabled: false,
            noise_enabled: false,
        }
    }

    /// Advance the tone generator and return this channel's contribution.
    fn sample(&mut self, base_step: u64, noise: bool) -> i16 {
        let active = self.tone.advance(base_step);
        if (self.tone_enabled && active) || (self.noise_enabled && noise) {
            self.volume
        } else {
            0
        }
    }
}

/// AY-3-8910 Programmable Sound Generator.
#[derive(Debug, Clone)]
pub struct Ay3_8910 {
    /// Raw register file.
    regs: [u8; REGISTERS],
    /// Register addressed by `write_data`/`read_data`.
    selected_reg: u8,

    channels: [Channel; 3],
    noise: NoiseGenerator,

    clock: u32,
    sample_rate: u32,
    /// Phase advance per sample pair: `CLOCK_BIAS * clock / sample_rate`.
    base_step: u64,

    buffer: Vec<i16>,
}

impl Default for Ay3_8910 {
    fn default() -> Self {
        Self::new()
    }
}

impl Ay3_8910 {
    /// Create a PSG clocked at 3.579545 MHz for a 44.1 kHz host, with the
    /// power-on register image loaded.
    #[must_use]
    pub fn new() -> Self {
        Self::build(PsgConfig::default())
    }

    /// Create a PSG for an explicit clock and host sample rate.
    pub fn with_config(config: PsgConfig) -> Result<Self, PsgError> {
        if config.sample_rate == 0 {
            return Err(PsgError::ZeroSampleRate);
        }
        Ok(Self::build(config))
    }

    fn build(config: PsgConfig) -> Self {
        let mut psg = Self {
            regs: [0; REGISTERS],
            selected_reg: 0,
            channels: [Channel::new(); 3],
            noise: NoiseGenerator::new(),
            clock: 0,
            sample_rate: config.sample_rate,
            base_step: 0,
            buffer: Vec::new(),
        };
        psg.set_clock(config.clock_hz);
        for (address, value) in DEFAULT_REGISTERS {
            psg.store(address, value);
        }
        psg
    }

    /// Chip input clock in Hz.
    #[must_use]
    pub fn clock(&self) -> u32 {
        self.clock
    }

    /// Change the chip clock and re-derive the base step.
    ///
    /// The noise step is clamped to the new base step. Tone steps depend
    /// only on their period registers and are unchanged.
    pub fn set_clock(&mut self, hz: u32) {
        self.clock = hz;
        self.base_step = CLOCK_BIAS * u64::from(hz) / u64::from(self.sample_rate);
        self.update_noise_step();
        log::debug!("AY-3-8910: clock {hz} Hz, base step {}", self.base_step);
    }

    /// Store `value` into register `address` and update what depends on it.
    pub fn write_register(&mut self, address: usize, value: u32) -> Result<(), PsgError> {
        if address >= REGISTERS {
            return Err(PsgError::InvalidRegister(address));
        }
        let byte = u8::try_from(value).map_err(|_| PsgError::InvalidValue { address, value })?;
        self.store(address, byte);
        Ok(())
    }

    /// Last value written to register `address`.
    pub fn read_register(&self, address: usize) -> Result<u8, PsgError> {
        self.regs
            .get(address)
            .copied()
            .ok_or(PsgError::InvalidRegister(address))
    }

    /// Latch a register index (0-15) for `write_data`/`read_data`.
    pub fn select_register(&mut self, reg: u8) {
        self.selected_reg = reg & 0x0F;
    }

    /// Write to the latched register.
    pub fn write_data(&mut self, value: u8) {
        self.store(usize::from(self.selected_reg), value);
    }

    /// Read the latched register.
    #[must_use]
    pub fn read_data(&self) -> u8 {
        self.regs[usize::from(self.selected_reg)]
    }

    fn store(&mut self, address: usize, value: u8) {
        self.regs[address] = value;

        match address {
            // Tone periods
            0..=5 => {
                let channel = address / 2;
                let fine = self.regs[channel * 2];
                let coarse = self.regs[channel * 2 + 1];
                let period = u16::from_le_bytes([fine, coarse]);
                self.channels[channel].tone.step = u64::from(period) << STEP_BIAS;
            }
            6 => self.update_noise_step(),
            7 => {
                for (index, channel) in self.channels.iter_mut().enumerate() {
                    channel.tone_enabled = value & MIXER_TONE[index] == 0;
                    channel.noise_enabled = value & MIXER_NOISE[index] == 0;
                }
            }
            8..=10 => {
                let channel = &mut self.channels[address - 8];
                let level = usize::from(value & VOLUME_MASK) << 1;
                channel.volume = VOLUME_TABLE[level] << VOLUME_BIAS;
                channel.envelope = value & ENVELOPE_FLAG != 0;
            }
            // Envelope and I/O ports are stored only.
            _ => {}
        }
    }

    fn update_noise_step(&mut self) {
        let period = u64::from(self.regs[6] & NOISE_PERIOD_MASK);
        self.noise.step = ((period << 1) << (STEP_BIAS + 1)).max(self.base_step);
    }

    /// Allocate or resize the internal output buffer to `length` samples.
    pub fn set_buffer_length(&mut self, length: usize) {
        self.buffer.resize(length, 0);
        log::debug!("AY-3-8910: buffer length {length}");
    }

    /// The internal output buffer as last generated.
    #[must_use]
    pub fn buffer(&self) -> &[i16] {
        &self.buffer
    }

    /// Render `length / 2` sample pairs into the internal buffer.
    pub fn generate(&mut self, length: usize) -> Result<(), PsgError> {
        if length > self.buffer.len() {
            return Err(PsgError::BufferTooSmall {
                requested: length,
                available: self.buffer.len(),
            });
        }
        let mut buffer = std::mem::take(&mut self.buffer);
        self.generate_into(&mut buffer[..length]);
        self.buffer = buffer;
        Ok(())
    }

    /// Render `out.len() / 2` sample pairs into a caller buffer. Left and
    /// right carry the same value. A trailing odd slot is left untouched.
    pub fn generate_into(&mut self, out: &mut [i16]) {
        for pair in out.chunks_exact_mut(2) {
            let value = self.next_sample();
            pair[0] = value;
            pair[1] = value;
        }
    }

    /// Advance every generator by one pair and mix.
    fn next_sample(&mut self) -> i16 {
        let noise = self.noise.advance(self.base_step);
        let base_step = self.base_step;
        self.channels
            .iter_mut()
            .map(|channel| channel.sample(base_step, noise))
            .sum()
    }
}

// ============================================================================
// Trait implementations
// ============================================================================

impl RegisterDevice for Ay3_8910 {
    type Error = PsgError;

    fn write_register(&mut self, address: usize, value: u32) -> Result<(), PsgError> {
        Ay3_8910::write_register(self, address, value)
    }

    fn read_register(&self, address: usize) -> Result<u8, PsgError> {
        Ay3_8910::read_register(self, address)
    }
}

impl AudioChannel for Ay3_8910 {
    type Error = PsgError;

    fn set_buffer_length(&mut self, length: usize) {
        Ay3_8910::set_buffer_length(self, length);
    }

    fn buffer(&self) -> &[i16] {
        Ay3_8910::buffer(self)
    }

    fn generate(&mut self, length: usize) -> Result<(), PsgError> {
        Ay3_8910::generate(self, length)
    }
}

impl Observable for Ay3_8910 {
    fn query(&self, path: &str) -> Option<Value> {
        if let Some(reg) = path.strip_prefix("reg.") {
            let address: usize = reg.parse().ok()?;
            return self.regs.get(address).map(|&value| value.into());
        }

        let channel_index = |name: &str| match name {
            "a" => Some(0),
            "b" => Some(1),
            "c" => Some(2),
            _ => None,
        };

        let mut parts = path.split('.');
        match (parts.next()?, parts.next(), parts.next(), parts.next()) {
            ("clock", None, None, None) => Some(Value::U64(u64::from(self.clock))),
            ("base_step", None, None, None) => Some(Value::U64(self.base_step)),
            ("selected", None, None, None) => Some(self.selected_reg.into()),
            ("noise", Some("step"), None, None) => Some(Value::U64(self.noise.step)),
            ("noise", Some("seed"), None, None) => Some(self.noise.seed.into()),
            ("tone", Some(ch), Some(field), None) => {
                let tone = &self.channels[channel_index(ch)?].tone;
                match field {
                    "step" => Some(Value::U64(tone.step)),
                    "active" => Some(tone.active.into()),
                    _ => None,
                }
            }
            ("volume", Some(ch), None, None) => {
                Some(self.channels[channel_index(ch)?].volume.into())
            }
            ("envelope", Some(ch), None, None) => {
                Some(self.channels[channel_index(ch)?].envelope.into())
            }
            ("mixer", Some(ch), Some(gate), None) => {
                let channel = &self.channels[channel_index(ch)?];
                match gate {
                    "tone" => Some(channel.tone_enabled.into()),
                    "noise" => Some(channel.noise_enabled.into()),
                    _ => None,
                }
            }
            _ => None,
        }
    }

    fn query_paths(&self) -> &'static [&'static str] {
        &[
            "clock",
            "base_step",
            "selected",
            "noise.step",
            "noise.seed",
            "tone.a.step",
            "tone.a.active",
            "tone.b.step",
            "tone.b.active",
            "tone.c.step",
            "tone.c.active",
            "volume.a",
            "volume.b",
            "volume.c",
            "envelope.a",
            "envelope.b",
            "envelope.c",
            "mixer.a.tone",
            "mixer.a.noise",
            "mixer.b.tone",
            "mixer.b.noise",
            "mixer.c.tone",
            "mixer.c.noise",
            "reg.0",
            "reg.1",
            "reg.2",
            "reg.3",
            "reg.4",
            "reg.5",
            "reg.6",
            "reg.7",
            "reg.8",
            "reg.9",
            "reg.10",
            "reg.11",
            "reg.12",
            "reg.13",
            "reg.14",
            "reg.15",
        ]
    }
}
