//! PWLE 指令编码
//!
//! 把一组 [`PrimitivePwle`] 编码为驱动可解析的逗号分隔 `key:value` 指令串：
//!
//! ```text
//! S:0,WF:4,RP:0,WT:0,T0:0,L0:0.5,F0:150,C0:1,B0:0,AR0:0,V0:0,T1:100,L1:0.8,...
//! └──── 固定头 ────┘ └──────────── 子段 0 ────────────┘ └─── 子段 1 ───
//! ```
//!
//! 每个子段字段带递增的段号 `<i>`。一个主动段会输出 1 或 2 个子段
//! （起点与上一段终点不一致时先插入一个零时长的过渡段），一个刹车段
//! 固定输出 2 个子段（零时长的起始标记 + 完整时长段）。

use crate::constants::*;
use crate::format::format_general;
use crate::types::{ActivePwle, Braking, BrakingPwle, PrimitivePwle};
use crate::VibratorError;

/// 指令固定头
pub const PWLE_HEADER: &str = "S:0,WF:4,RP:0,WT:0";

/// "未定义"的上一段终点（任何合法幅度/频率都不会等于它）
const UNDEFINED_END: f32 = -1.0;

/// 编码结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PwleCommand {
    /// 完整指令串
    pub command: String,
    /// 总播放时长（毫秒），过渡段不计入
    pub total_duration_ms: u32,
    /// 输出的子段数量
    pub segment_count: u32,
}

/// 编码 PWLE 组合
///
/// 按顺序逐段校验，遇到第一个非法段立即返回错误，不产生任何部分输出。
///
/// # 参数
///
/// - `segments`: 原语序列，长度必须在 `[1, max_segments]`
/// - `max_segments`: 设备允许的最大原语数量
/// - `supported_braking`: 设备支持的刹车类型
///
/// # Errors
///
/// - `InvalidArgument`: 序列长度、时长、幅度或频率越界
/// - `UnsupportedOperation`: 刹车类型不在 `supported_braking` 中
///
/// # Example
///
/// ```rust
/// use vibrator_protocol::{ActivePwle, Braking, COMPOSE_PWLE_SIZE_MAX, PrimitivePwle, encode_pwle};
///
/// let segments: [PrimitivePwle; 1] = [ActivePwle {
///     start_amplitude: 0.5,
///     start_frequency: 150.0,
///     end_amplitude: 0.8,
///     end_frequency: 150.0,
///     duration_ms: 100,
/// }
/// .into()];
/// let pwle = encode_pwle(&segments, COMPOSE_PWLE_SIZE_MAX, &[Braking::None, Braking::Clab])
///     .unwrap();
/// assert!(pwle.command.starts_with("S:0,WF:4,RP:0,WT:0,T0:0,L0:0.5,F0:150,"));
/// assert_eq!(pwle.total_duration_ms, 100);
/// ```
pub fn encode_pwle(
    segments: &[PrimitivePwle],
    max_segments: usize,
    supported_braking: &[Braking],
) -> Result<PwleCommand, VibratorError> {
    if segments.is_empty() || segments.len() > max_segments {
        return Err(VibratorError::InvalidArgument(format!(
            "PWLE composition size {} not in [1, {}]",
            segments.len(),
            max_segments
        )));
    }

    let builder = segments.iter().enumerate().try_fold(
        PwleBuilder::new(),
        |mut builder, (position, segment)| {
            match segment {
                PrimitivePwle::Active(active) => {
                    validate_active(position, active)?;
                    builder.push_active(active);
                },
                PrimitivePwle::Braking(braking) => {
                    validate_braking(position, braking, supported_braking)?;
                    builder.push_braking(braking);
                },
            }
            Ok::<_, VibratorError>(builder)
        },
    )?;

    Ok(builder.finish())
}

fn validate_active(position: usize, active: &ActivePwle) -> Result<(), VibratorError> {
    if !(0..=COMPOSE_PWLE_PRIMITIVE_DURATION_MAX_MS).contains(&active.duration_ms) {
        return Err(VibratorError::InvalidArgument(format!(
            "segment {}: active duration {} ms not in [0, {}]",
            position, active.duration_ms, COMPOSE_PWLE_PRIMITIVE_DURATION_MAX_MS
        )));
    }

    let levels = PWLE_LEVEL_MIN..=PWLE_LEVEL_MAX;
    for amplitude in [active.start_amplitude, active.end_amplitude] {
        if !levels.contains(&amplitude) {
            return Err(VibratorError::InvalidArgument(format!(
                "segment {}: amplitude {} not in [{}, {}]",
                position, amplitude, PWLE_LEVEL_MIN, PWLE_LEVEL_MAX
            )));
        }
    }

    let frequencies = PWLE_FREQUENCY_MIN_HZ..=PWLE_FREQUENCY_MAX_HZ;
    for frequency in [active.start_frequency, active.end_frequency] {
        if !frequencies.contains(&frequency) {
            return Err(VibratorError::InvalidArgument(format!(
                "segment {}: frequency {} Hz not in [{}, {}]",
                position, frequency, PWLE_FREQUENCY_MIN_HZ, PWLE_FREQUENCY_MAX_HZ
            )));
        }
    }

    Ok(())
}

fn validate_braking(
    position: usize,
    braking: &BrakingPwle,
    supported_braking: &[Braking],
) -> Result<(), VibratorError> {
    if !supported_braking.contains(&braking.braking) {
        return Err(VibratorError::UnsupportedOperation(format!(
            "segment {}: braking {} not supported",
            position, braking.braking
        )));
    }

    // 刹车段没有下限
    if braking.duration_ms > COMPOSE_PWLE_PRIMITIVE_DURATION_MAX_MS {
        return Err(VibratorError::InvalidArgument(format!(
            "segment {}: braking duration {} ms exceeds {}",
            position, braking.duration_ms, COMPOSE_PWLE_PRIMITIVE_DURATION_MAX_MS
        )));
    }

    Ok(())
}

/// 单次编码的累加状态
struct PwleBuilder {
    command: String,
    segment_index: u32,
    total_duration_ms: u32,
    prev_end_amplitude: f32,
    prev_end_frequency: f32,
}

impl PwleBuilder {
    fn new() -> Self {
        Self {
            command: PWLE_HEADER.to_string(),
            segment_index: 0,
            total_duration_ms: 0,
            prev_end_amplitude: UNDEFINED_END,
            prev_end_frequency: UNDEFINED_END,
        }
    }

    fn push_active(&mut self, active: &ActivePwle) {
        // 精确比较，不引入容差
        let continues = active.start_amplitude == self.prev_end_amplitude
            && active.start_frequency == self.prev_end_frequency;
        if !continues {
            self.write_active(0, active.start_amplitude, active.start_frequency);
        }

        self.write_active(active.duration_ms, active.end_amplitude, active.end_frequency);

        self.prev_end_amplitude = active.end_amplitude;
        self.prev_end_frequency = active.end_frequency;
        self.add_duration(active.duration_ms);
    }

    fn push_braking(&mut self, braking: &BrakingPwle) {
        self.write_braking(0, braking.braking);
        self.write_braking(braking.duration_ms, braking.braking);

        // 刹车之后连续性不再成立，下一个主动段必须重新定位起点
        self.prev_end_amplitude = UNDEFINED_END;
        self.prev_end_frequency = UNDEFINED_END;
        self.add_duration(braking.duration_ms);
    }

    fn write_active(&mut self, duration_ms: i32, amplitude: f32, frequency: f32) {
        let i = self.segment_index;
        self.command.push_str(&format!(
            ",T{i}:{duration_ms},L{i}:{},F{i}:{},C{i}:1,B{i}:0,AR{i}:0,V{i}:0",
            format_general(amplitude),
            format_general(frequency),
        ));
        self.segment_index += 1;
    }

    fn write_braking(&mut self, duration_ms: i32, braking: Braking) {
        let i = self.segment_index;
        self.command.push_str(&format!(
            ",T{i}:{duration_ms},L{i}:0,F{i}:0,C{i}:0,B{i}:{},AR{i}:0,V{i}:0",
            braking.as_raw(),
        ));
        self.segment_index += 1;
    }

    fn add_duration(&mut self, duration_ms: i32) {
        // 负时长（仅刹车段可能出现）不计入总时长
        self.total_duration_ms = self
            .total_duration_ms
            .saturating_add(duration_ms.max(0).unsigned_abs());
    }

    fn finish(self) -> PwleCommand {
        PwleCommand {
            command: self.command,
            total_duration_ms: self.total_duration_ms,
            segment_count: self.segment_index,
        }
    }
}

/// 计算带宽-幅度表
///
/// 共 [`PWLE_BW_MAP_SIZE`] 项，对应 `[PWLE_FREQUENCY_MIN_HZ, PWLE_FREQUENCY_MAX_HZ]`
/// 按分辨率等分的频点。谐振频点（中心）为 1.0，向两侧每一项递减 0.01：
///
/// ```text
/// 0.9, 0.91, ..., 0.99, 1.0, 0.99, ..., 0.91, 0.9
/// ```
pub fn bandwidth_amplitude_map() -> Vec<f32> {
    let half = PWLE_BW_MAP_SIZE / 2;
    let mut map = vec![PWLE_LEVEL_MAX; PWLE_BW_MAP_SIZE];
    for i in 0..half {
        map[half + i + 1] = map[half + i] - PWLE_BW_MAP_STEP;
        map[half - i - 1] = map[half - i] - PWLE_BW_MAP_STEP;
    }
    map
}
