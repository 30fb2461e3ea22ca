//! 设备限制常量
//!
//! 数值来自 aw8697 触觉驱动的出厂配置。

// ============================================================================
// 组合效果（compose）
// ============================================================================

/// 组合效果中单个原语前的最大延迟（毫秒）
pub const COMPOSE_DELAY_MAX_MS: i32 = 1000;

/// 组合效果的最大原语数量
pub const COMPOSE_SIZE_MAX: usize = 256;

/// 非 NOOP 原语的固定播放时长（毫秒）
pub const PRIMITIVE_DURATION_MS: i32 = 100;

// ============================================================================
// PWLE
// ============================================================================

/// PWLE 组合的最大原语数量
pub const COMPOSE_PWLE_SIZE_MAX: usize = 127;

/// 单个 PWLE 原语的最大时长（毫秒，14 bit）
pub const COMPOSE_PWLE_PRIMITIVE_DURATION_MAX_MS: i32 = 16383;

/// PWLE 幅度下限
pub const PWLE_LEVEL_MIN: f32 = 0.0;
/// PWLE 幅度上限
pub const PWLE_LEVEL_MAX: f32 = 1.0;

/// 频率分辨率（Hz）
pub const PWLE_FREQUENCY_RESOLUTION_HZ: f32 = 1.0;
/// 频率下限（Hz）
pub const PWLE_FREQUENCY_MIN_HZ: f32 = 140.0;
/// 谐振频率（Hz）
pub const RESONANT_FREQUENCY_HZ: f32 = 150.0;
/// 频率上限（Hz）
pub const PWLE_FREQUENCY_MAX_HZ: f32 = 160.0;

/// 品质因数
pub const Q_FACTOR: f32 = 11.0;

/// 带宽-幅度表长度：1 + (max - min) / resolution
pub const PWLE_BW_MAP_SIZE: usize =
    1 + ((PWLE_FREQUENCY_MAX_HZ - PWLE_FREQUENCY_MIN_HZ) / PWLE_FREQUENCY_RESOLUTION_HZ) as usize;

/// 带宽-幅度表相邻两项的幅度差
pub const PWLE_BW_MAP_STEP: f32 = 0.01;

// ============================================================================
// 固件波形表
// ============================================================================

/// 固件波形索引（写入 index 节点）
pub mod waveform_index {
    pub const TICK: u32 = 1;
    pub const CLICK: u32 = 2;
    pub const TEXTURE_TICK: u32 = 4;
    pub const HEAVY_CLICK: u32 = 5;
    pub const DOUBLE_CLICK: u32 = 6;
    pub const THUD: u32 = 7;
}

/// 固件波形时长（毫秒）
pub mod waveform_duration_ms {
    pub const TICK: u32 = 10;
    pub const TEXTURE_TICK: u32 = 20;
    pub const CLICK: u32 = 15;
    pub const HEAVY_CLICK: u32 = 30;
    pub const DOUBLE_CLICK: u32 = 60;
    pub const THUD: u32 = 35;
    pub const POP: u32 = 15;
}
