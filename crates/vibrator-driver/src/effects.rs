//! 效果与原语表
//!
//! 预定义效果映射到固件内置波形（index 节点）及其播放时长。

use vibrator_protocol::constants::{waveform_duration_ms, waveform_index};
use vibrator_protocol::{
    Braking, CompositePrimitive, Effect, PRIMITIVE_DURATION_MS, VibratorError,
};

/// 固件波形
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Waveform {
    /// 写入 index 节点的波形索引
    pub index: u32,
    /// 播放时长（毫秒）
    pub duration_ms: u32,
}

/// 支持的预定义效果
pub const SUPPORTED_EFFECTS: &[Effect] = &[
    Effect::Tick,
    Effect::TextureTick,
    Effect::Click,
    Effect::HeavyClick,
    Effect::DoubleClick,
    Effect::Thud,
    Effect::Pop,
];

/// 支持的组合原语
pub const SUPPORTED_PRIMITIVES: &[CompositePrimitive] = &[
    CompositePrimitive::Noop,
    CompositePrimitive::Click,
    CompositePrimitive::Thud,
    CompositePrimitive::Spin,
    CompositePrimitive::QuickRise,
    CompositePrimitive::SlowRise,
    CompositePrimitive::QuickFall,
    CompositePrimitive::LightTick,
    CompositePrimitive::LowTick,
];

/// 支持的 PWLE 刹车类型
pub const SUPPORTED_BRAKING: &[Braking] = &[Braking::None, Braking::Clab];

/// 查找效果对应的固件波形
///
/// POP 没有独立波形，复用 TICK 的波形索引。
pub fn waveform_for(effect: Effect) -> Result<Waveform, VibratorError> {
    let (index, duration_ms) = match effect {
        Effect::Tick => (waveform_index::TICK, waveform_duration_ms::TICK),
        Effect::TextureTick => (waveform_index::TEXTURE_TICK, waveform_duration_ms::TEXTURE_TICK),
        Effect::Click => (waveform_index::CLICK, waveform_duration_ms::CLICK),
        Effect::HeavyClick => (waveform_index::HEAVY_CLICK, waveform_duration_ms::HEAVY_CLICK),
        Effect::DoubleClick => (waveform_index::DOUBLE_CLICK, waveform_duration_ms::DOUBLE_CLICK),
        Effect::Thud => (waveform_index::THUD, waveform_duration_ms::THUD),
        Effect::Pop => (waveform_index::TICK, waveform_duration_ms::POP),
        other => {
            return Err(VibratorError::UnsupportedOperation(format!(
                "effect {} not supported",
                other
            )));
        },
    };
    Ok(Waveform { index, duration_ms })
}

/// 原语播放时长（毫秒）
pub fn primitive_duration(primitive: CompositePrimitive) -> Result<i32, VibratorError> {
    if !SUPPORTED_PRIMITIVES.contains(&primitive) {
        return Err(VibratorError::UnsupportedOperation(format!(
            "primitive {} not supported",
            primitive
        )));
    }
    Ok(match primitive {
        CompositePrimitive::Noop => 0,
        _ => PRIMITIVE_DURATION_MS,
    })
}
