type Addr = u16;
type Reg = u8;

/// One decoded CHIP-8 instruction. Register operands are register indices,
/// not register values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// CLS
    /// 0x00E0
    ClearScreen,
    /// RET
    /// 0x00EE
    Ret,
    /// JP addr
    /// 0x1NNN
    Jump(Addr),
    /// CALL addr
    /// 0x2NNN
    Call(Addr),
    /// SE Vx imm8
    /// 0x3XNN
    /// Skip next instruction if Vx == imm8
    SkipEqImm(Reg, u8),
    /// SNE Vx imm8
    /// 0x4XNN
    SkipNeImm(Reg, u8),
    /// SE Vx Vy
    /// 0x5XY0
    SkipEqReg(Reg, Reg),
    /// LD Vx imm8
    /// 0x6XNN
    SetImm(Reg, u8),
    /// ADD Vx imm8
    /// 0x7XNN
    /// Wraps, leaves VF alone
    AddImm(Reg, u8),
    /// LD Vx Vy
    /// 0x8XY0
    SetReg(Reg, Reg),
    /// OR Vx Vy
    /// 0x8XY1
    OrReg(Reg, Reg),
    /// AND Vx Vy
    /// 0x8XY2
    AndReg(Reg, Reg),
    /// XOR Vx Vy
    /// 0x8XY3
    XorReg(Reg, Reg),
    /// ADD Vx Vy
    /// 0x8XY4
    /// VF = carry
    AddReg(Reg, Reg),
    /// SUB Vx Vy
    /// 0x8XY5
    /// VF = 1 if Vx >= Vy
    SubReg(Reg, Reg),
    /// SHR Vx Vy
    /// 0x8XY6
    /// VF = bit shifted out. Whether Vy is read depends on the shift quirk.
    Rsh(Reg, Reg),
    /// SUBN Vx Vy
    /// 0x8XY7
    /// Vx = Vy - Vx; VF = 1 if Vy >= Vx
    SubFrom(Reg, Reg),
    /// SHL Vx Vy
    /// 0x8XYE
    Lsh(Reg, Reg),
    /// SNE Vx Vy
    /// 0x9XY0
    SkipNeReg(Reg, Reg),
    /// LD I addr
    /// 0xANNN
    SetMemPtr(Addr),
    /// JP V0 addr
    /// 0xBNNN
    JumpOffset(Addr),
    /// RND Vx imm8
    /// 0xCXNN
    Rand(Reg, u8),
    /// DRW Vx Vy imm4
    /// 0xDXYN
    /// Draw the N-byte sprite at I to (Vx, Vy); successive bytes are drawn
    /// one below the next. VF = collision.
    Draw(Reg, Reg, u8),
    /// SKP Vx
    /// 0xEX9E
    SkipKeyPressed(Reg),
    /// SKNP Vx
    /// 0xEXA1
    SkipKeyNotPressed(Reg),
    /// LD Vx DT
    /// 0xFX07
    GetDelay(Reg),
    /// LD Vx K
    /// 0xFX0A
    /// Wait for a key press and store it in Vx
    WaitForKey(Reg),
    /// LD DT Vx
    /// 0xFX15
    SetDelay(Reg),
    /// LD ST Vx
    /// 0xFX18
    SetSound(Reg),
    /// ADD I Vx
    /// 0xFX1E
    AddMemPtr(Reg),
    /// LD F Vx
    /// 0xFX29
    /// I = address of the glyph for the digit in Vx
    SetChar(Reg),
    /// LD B Vx
    /// 0xFX33
    BCD(Reg),
    /// LD [I] Vx
    /// 0xFX55
    /// Store V0..=Vx starting at I
    RegDump(Reg),
    /// LD Vx [I]
    /// 0xFX65
    /// Fill V0..=Vx from memory starting at I
    RegLoad(Reg),
}

// First register argument
macro_rules! X {
    ($opcode: expr) => {
        (($opcode & 0x0F00) >> 8) as u8
    };
}

// Second register argument
macro_rules! Y {
    ($opcode: expr) => {
        (($opcode & 0x00F0) >> 4) as u8
    };
}

// 4-bit immediate
macro_rules! N {
    ($opcode: expr) => {
        ($opcode & 0x000F) as u8
    };
}

// 8-bit immediate
macro_rules! NN {
    ($opcode: expr) => {
        ($opcode & 0x00FF) as u8
    };
}

// 12-bit immediate
macro_rules! NNN {
    ($opcode: expr) => {
        $opcode & 0x0FFF
    };
}

macro_rules! XNN {
    ($reg: expr, $imm: expr) => {
        (($reg as u16 & 0xF) << 8) | $imm as u16
    };
}

macro_rules! XY {
    ($r1: expr, $r2: expr) => {
        (($r1 as u16 & 0xF) << 8) | (($r2 as u16 & 0xF) << 4)
    };
}

impl From<Instruction> for u16 {
    fn from(value: Instruction) -> Self {
        match value {
            Instruction::ClearScreen => 0x00E0,
            Instruction::Ret => 0x00EE,
            Instruction::Jump(v) => 0x1000 | NNN!(v),
            Instruction::Call(v) => 0x2000 | NNN!(v),
            Instruction::SkipEqImm(reg, imm) => 0x3000 | XNN!(reg, imm),
            Instruction::SkipNeImm(reg, imm) => 0x4000 | XNN!(reg, imm),
            Instruction::SkipEqReg(r1, r2) => 0x5000 | XY!(r1, r2),
            Instruction::SetImm(reg, imm) => 0x6000 | XNN!(reg, imm),
            Instruction::AddImm(reg, imm) => 0x7000 | XNN!(reg, imm),
            Instruction::SetReg(r1, r2) => 0x8000 | XY!(r1, r2),
            Instruction::OrReg(r1, r2) => 0x8000 | XY!(r1, r2) | 1,
            Instruction::AndReg(r1, r2) => 0x8000 | XY!(r1, r2) | 2,
            Instruction::XorReg(r1, r2) => 0x8000 | XY!(r1, r2) | 3,
            Instruction::AddReg(r1, r2) => 0x8000 | XY!(r1, r2) | 4,
            Instruction::SubReg(r1, r2) => 0x8000 | XY!(r1, r2) | 5,
            Instruction::Rsh(r1, r2) => 0x8000 | XY!(r1, r2) | 6,
            Instruction::SubFrom(r1, r2) => 0x8000 | XY!(r1, r2) | 7,
            Instruction::Lsh(r1, r2) => 0x8000 | XY!(r1, r2) | 0xE,
            Instruction::SkipNeReg(r1, r2) => 0x9000 | XY!(r1, r2),
            Instruction::SetMemPtr(imm) => 0xA000 | NNN!(imm),
            Instruction::JumpOffset(imm) => 0xB000 | NNN!(imm),
            Instruction::Rand(reg, imm) => 0xC000 | XNN!(reg, imm),
            Instruction::Draw(x, y, n) => 0xD000 | XY!(x, y) | (n & 0xF) as u16,
            Instruction::SkipKeyPressed(reg) => 0xE09E | XY!(reg, 0),
            Instruction::SkipKeyNotPressed(reg) => 0xE0A1 | XY!(reg, 0),
            Instruction::GetDelay(reg) => 0xF007 | XY!(reg, 0),
            Instruction::WaitForKey(reg) => 0xF00A | XY!(reg, 0),
            Instruction::SetDelay(reg) => 0xF015 | XY!(reg, 0),
            Instruction::SetSound(reg) => 0xF018 | XY!(reg, 0),
            Instruction::AddMemPtr(reg) => 0xF01E | XY!(reg, 0),
            Instruction::SetChar(reg) => 0xF029 | XY!(reg, 0),
            Instruction::BCD(reg) => 0xF033 | XY!(reg, 0),
            Instruction::RegDump(reg) => 0xF055 | XY!(reg, 0),
            Instruction::RegLoad(reg) => 0xF065 | XY!(reg, 0),
        }
    }
}

impl std::fmt::Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Instruction::ClearScreen => write!(f, "CLS"),
            Instruction::Ret => write!(f, "RET"),
            Instruction::Jump(addr) => write!(f, "JP {addr:#05x}"),
            Instruction::Call(addr) => write!(f, "CALL {addr:#05x}"),
            Instruction::SkipEqImm(reg, imm) => write!(f, "SE V{reg:X} {imm:#04x}"),
            Instruction::SkipEqReg(r1, r2) => write!(f, "SE V{r1:X} V{r2:X}"),
            Instruction::SkipNeImm(reg, imm) => write!(f, "SNE V{reg:X} {imm:#04x}"),
            Instruction::SkipNeReg(r1, r2) => write!(f, "SNE V{r1:X} V{r2:X}"),
            Instruction::SetImm(reg, imm) => write!(f, "LD V{reg:X} {imm:#04x}"),
            Instruction::AddImm(reg, imm) => write!(f, "ADD V{reg:X} {imm:#04x}"),
            Instruction::AddMemPtr(reg) => write!(f, "ADD I V{reg:X}"),
            Instruction::AddReg(r1, r2) => write!(f, "ADD V{r1:X} V{r2:X}"),
            Instruction::SetReg(r1, r2) => write!(f, "LD V{r1:X} V{r2:X}"),
            Instruction::OrReg(r1, r2) => write!(f, "OR V{r1:X} V{r2:X}"),
            Instruction::AndReg(r1, r2) => write!(f, "AND V{r1:X} V{r2:X}"),
            Instruction::XorReg(r1, r2) => write!(f, "XOR V{r1:X} V{r2:X}"),
            Instruction::SubReg(r1, r2) => write!(f, "SUB V{r1:X} V{r2:X}"),
            Instruction::Rsh(r1, r2) => write!(f, "SHR V{r1:X} V{r2:X}"),
            Instruction::SubFrom(r1, r2) => write!(f, "SUBN V{r1:X} V{r2:X}"),
            Instruction::Lsh(r1, r2) => write!(f, "SHL V{r1:X} V{r2:X}"),
            Instruction::SetMemPtr(imm) => write!(f, "LD I {imm:#05x}"),
            Instruction::JumpOffset(imm) => write!(f, "JP V0 {imm:#05x}"),
            Instruction::Rand(reg, imm) => write!(f, "RND V{reg:X} {imm:#04x}"),
            Instruction::Draw(x, y, n) => write!(f, "DRW V{x:X} V{y:X} {n}"),
            Instruction::SkipKeyPressed(reg) => write!(f, "SKP V{reg:X}"),
            Instruction::SkipKeyNotPressed(reg) => write!(f, "SKNP V{reg:X}"),
            Instruction::GetDelay(reg) => write!(f, "LD V{reg:X} DT"),
            Instruction::WaitForKey(reg) => write!(f, "LD V{reg:X} K"),
            Instruction::SetDelay(reg) => write!(f, "LD DT V{reg:X}"),
            Instruction::SetSound(reg) => write!(f, "LD ST V{reg:X}"),
            Instruction::SetChar(reg) => write!(f, "LD F V{reg:X}"),
            Instruction::BCD(reg) => write!(f, "LD B V{reg:X}"),
            Instruction::RegDump(reg) => write!(f, "LD [I] V{reg:X}"),
            Instruction::RegLoad(reg) => write!(f, "LD V{reg:X} [I]"),
        }
    }
}

impl Instruction {
    /// Decode a raw instruction word. `None` means the word matches no
    /// instruction, including the legacy `0NNN` machine-code call.
    pub fn decode(opcode: u16) -> Option<Self> {
        let instruction = match opcode & 0xF000 {
            0x0000 => match opcode {
                0x00E0 => Self::ClearScreen,
                0x00EE => Self::Ret,
                _ => return None,
            },
            0x1000 => Self::Jump(NNN!(opcode)),
            0x2000 => Self::Call(NNN!(opcode)),
            0x3000 => Self::SkipEqImm(X!(opcode), NN!(opcode)),
            0x4000 => Self::SkipNeImm(X!(opcode), NN!(opcode)),
            0x5000 if N!(opcode) == 0 => Self::SkipEqReg(X!(opcode), Y!(opcode)),
            0x6000 => Self::SetImm(X!(opcode), NN!(opcode)),
            0x7000 => Self::AddImm(X!(opcode), NN!(opcode)),
            0x8000 => match N!(opcode) {
                0x0 => Self::SetReg(X!(opcode), Y!(opcode)),
                0x1 => Self::OrReg(X!(opcode), Y!(opcode)),
                0x2 => Self::AndReg(X!(opcode), Y!(opcode)),
                0x3 => Self::XorReg(X!(opcode), Y!(opcode)),
                0x4 => Self::AddReg(X!(opcode), Y!(opcode)),
                0x5 => Self::SubReg(X!(opcode), Y!(opcode)),
                0x6 => Self::Rsh(X!(opcode), Y!(opcode)),
                0x7 => Self::SubFrom(X!(opcode), Y!(opcode)),
                0xE => Self::Lsh(X!(opcode), Y!(opcode)),
                _ => return None,
            },
            0x9000 if N!(opcode) == 0 => Self::SkipNeReg(X!(opcode), Y!(opcode)),
            0xA000 => Self::SetMemPtr(NNN!(opcode)),
            0xB000 => Self::JumpOffset(NNN!(opcode)),
            0xC000 => Self::Rand(X!(opcode), NN!(opcode)),
            0xD000 => Self::Draw(X!(opcode), Y!(opcode), N!(opcode)),
            0xE000 => match NN!(opcode) {
                0x9E => Self::SkipKeyPressed(X!(opcode)),
                0xA1 => Self::SkipKeyNotPressed(X!(opcode)),
                _ => return None,
            },
            0xF000 => match NN!(opcode) {
                0x07 => Self::GetDelay(X!(opcode)),
                0x0A => Self::WaitForKey(X!(opcode)),
                0x15 => Self::SetDelay(X!(opcode)),
                0x18 => Self::SetSound(X!(opcode)),
                0x1E => Self::AddMemPtr(X!(opcode)),
                0x29 => Self::SetChar(X!(opcode)),
                0x33 => Self::BCD(X!(opcode)),
                0x55 => Self::RegDump(X!(opcode)),
                0x65 => Self::RegLoad(X!(opcode)),
                _ => return None,
            },
            _ => return None,
        };
        Some(instruction)
    }
}

/// Encode a program as the big-endian byte image a ROM would contain
pub fn assemble(program: &[Instruction]) -> Vec<u8> {
    program
        .iter()
        .flat_map(|i| u16::from(*i).to_be_bytes())
        .collect()
}

#[test]
fn test_decode() {
    assert_eq!(Instruction::decode(0x00E0), Some(Instruction::ClearScreen));
    assert_eq!(Instruction::decode(0x1e35), Some(Instruction::Jump(0xe35)));
    assert_eq!(Instruction::decode(0x5e30), Some(Instruction::SkipEqReg(0xe, 0x3)));
    assert_eq!(Instruction::decode(0xD125), Some(Instruction::Draw(1, 2, 5)));
    assert_eq!(Instruction::decode(0x8AB6), Some(Instruction::Rsh(0xA, 0xB)));
    assert_eq!(Instruction::decode(0xF30A), Some(Instruction::WaitForKey(3)));
    assert_eq!(Instruction::decode(0xFA65), Some(Instruction::RegLoad(0xA)));
}

#[test]
fn test_decode_rejects_unknown_words() {
    for opcode in [0x0000, 0x0123, 0x00E1, 0x5121, 0x9124, 0x912F, 0x8008, 0x800F, 0xE09F, 0xF000, 0xF0FF] {
        assert_eq!(Instruction::decode(opcode), None, "{opcode:#06x}");
    }
}

#[test]
fn test_encode_matches_decode() {
    let program = [
        Instruction::ClearScreen,
        Instruction::Call(0x2F0),
        Instruction::AddReg(1, 2),
        Instruction::Lsh(4, 5),
        Instruction::Draw(0, 1, 0xF),
        Instruction::SkipKeyNotPressed(0xC),
        Instruction::BCD(7),
    ];
    for instruction in program {
        assert_eq!(Instruction::decode(instruction.into()), Some(instruction));
    }
}

#[test]
fn test_assemble_is_big_endian() {
    assert_eq!(
        assemble(&[Instruction::Jump(0x204), Instruction::SetImm(0xA, 0x42)]),
        vec![0x12, 0x04, 0x6A, 0x42]
    );
}

#[test]
fn test_display() {
    assert_eq!(Instruction::Draw(0, 1, 5).to_string(), "DRW V0 V1 5");
    assert_eq!(Instruction::Jump(0x2a0).to_string(), "JP 0x2a0");
    assert_eq!(Instruction::RegDump(0xB).to_string(), "LD [I] VB");
}
