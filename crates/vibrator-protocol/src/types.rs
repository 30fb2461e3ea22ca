//! 接口类型定义
//!
//! 与服务接口一一对应的枚举与结构体。枚举的整数值即接口上传输的原始值，
//! 越界的原始值在 `from_raw()` 处被拒绝。

use crate::VibratorError;
use std::fmt;
use std::ops::{BitOr, BitOrAssign};
use std::str::FromStr;

/// 定义一个带名称表的接口枚举
///
/// 生成：`repr(i32)` 枚举、`ALL`、`name()`、`from_raw()`、`Display`、
/// `FromStr`（大小写不敏感），以及可选的按名称序列化。
macro_rules! hal_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident = $value:literal => $text:literal,
            )+
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
            num_enum::TryFromPrimitive, num_enum::IntoPrimitive,
        )]
        #[repr(i32)]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant = $value,
            )+
        }

        impl $name {
            /// 全部枚举值（按原始值升序）
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            /// 接口名称
            pub fn name(self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }

            /// 从原始值转换，越界返回 `InvalidArgument`
            pub fn from_raw(value: i32) -> Result<Self, VibratorError> {
                Self::try_from(value).map_err(|_| {
                    VibratorError::InvalidArgument(format!(
                        "{} out of range: {}",
                        stringify!($name),
                        value
                    ))
                })
            }

            /// 原始值
            pub fn as_raw(self) -> i32 {
                self as i32
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        impl FromStr for $name {
            type Err = VibratorError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.name().eq_ignore_ascii_case(s))
                    .ok_or_else(|| {
                        VibratorError::InvalidArgument(format!(
                            "unknown {}: {}",
                            stringify!($name),
                            s
                        ))
                    })
            }
        }

        #[cfg(feature = "serde")]
        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.name())
            }
        }

        #[cfg(feature = "serde")]
        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let text = String::deserialize(deserializer)?;
                text.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

hal_enum! {
    /// 预定义振动效果
    pub enum Effect {
        Click = 0 => "CLICK",
        DoubleClick = 1 => "DOUBLE_CLICK",
        Tick = 2 => "TICK",
        Thud = 3 => "THUD",
        Pop = 4 => "POP",
        HeavyClick = 5 => "HEAVY_CLICK",
        Ringtone1 = 6 => "RINGTONE_1",
        Ringtone2 = 7 => "RINGTONE_2",
        Ringtone3 = 8 => "RINGTONE_3",
        Ringtone4 = 9 => "RINGTONE_4",
        Ringtone5 = 10 => "RINGTONE_5",
        Ringtone6 = 11 => "RINGTONE_6",
        Ringtone7 = 12 => "RINGTONE_7",
        Ringtone8 = 13 => "RINGTONE_8",
        Ringtone9 = 14 => "RINGTONE_9",
        Ringtone10 = 15 => "RINGTONE_10",
        Ringtone11 = 16 => "RINGTONE_11",
        Ringtone12 = 17 => "RINGTONE_12",
        Ringtone13 = 18 => "RINGTONE_13",
        Ringtone14 = 19 => "RINGTONE_14",
        Ringtone15 = 20 => "RINGTONE_15",
        TextureTick = 21 => "TEXTURE_TICK",
    }
}

hal_enum! {
    /// 效果强度
    pub enum EffectStrength {
        Light = 0 => "LIGHT",
        Medium = 1 => "MEDIUM",
        Strong = 2 => "STRONG",
    }
}

hal_enum! {
    /// 组合效果原语
    pub enum CompositePrimitive {
        /// 空原语，仅占位延迟
        Noop = 0 => "NOOP",
        Click = 1 => "CLICK",
        Thud = 2 => "THUD",
        Spin = 3 => "SPIN",
        QuickRise = 4 => "QUICK_RISE",
        SlowRise = 5 => "SLOW_RISE",
        QuickFall = 6 => "QUICK_FALL",
        LightTick = 7 => "LIGHT_TICK",
        LowTick = 8 => "LOW_TICK",
    }
}

hal_enum! {
    /// PWLE 刹车类型
    ///
    /// 原始值直接写入指令字符串的 `B<i>` 字段。
    pub enum Braking {
        /// 不刹车
        None = 0 => "NONE",
        /// 闭环主动刹车（closed-loop active braking）
        Clab = 1 => "CLAB",
    }
}

/// 设备能力位
///
/// 与服务接口的 `CAP_*` 常量取值一致。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Capabilities(pub u32);

impl Capabilities {
    pub const ON_CALLBACK: Self = Self(1 << 0);
    pub const PERFORM_CALLBACK: Self = Self(1 << 1);
    pub const AMPLITUDE_CONTROL: Self = Self(1 << 2);
    pub const EXTERNAL_CONTROL: Self = Self(1 << 3);
    pub const EXTERNAL_AMPLITUDE_CONTROL: Self = Self(1 << 4);
    pub const COMPOSE_EFFECTS: Self = Self(1 << 5);
    pub const ALWAYS_ON_CONTROL: Self = Self(1 << 6);
    pub const GET_RESONANT_FREQUENCY: Self = Self(1 << 7);
    pub const GET_Q_FACTOR: Self = Self(1 << 8);
    pub const FREQUENCY_CONTROL: Self = Self(1 << 9);
    pub const COMPOSE_PWLE_EFFECTS: Self = Self(1 << 10);

    /// 全部能力位及其接口名称（按位序）
    pub const NAMED: &'static [(Self, &'static str)] = &[
        (Self::ON_CALLBACK, "ON_CALLBACK"),
        (Self::PERFORM_CALLBACK, "PERFORM_CALLBACK"),
        (Self::AMPLITUDE_CONTROL, "AMPLITUDE_CONTROL"),
        (Self::EXTERNAL_CONTROL, "EXTERNAL_CONTROL"),
        (Self::EXTERNAL_AMPLITUDE_CONTROL, "EXTERNAL_AMPLITUDE_CONTROL"),
        (Self::COMPOSE_EFFECTS, "COMPOSE_EFFECTS"),
        (Self::ALWAYS_ON_CONTROL, "ALWAYS_ON_CONTROL"),
        (Self::GET_RESONANT_FREQUENCY, "GET_RESONANT_FREQUENCY"),
        (Self::GET_Q_FACTOR, "GET_Q_FACTOR"),
        (Self::FREQUENCY_CONTROL, "FREQUENCY_CONTROL"),
        (Self::COMPOSE_PWLE_EFFECTS, "COMPOSE_PWLE_EFFECTS"),
    ];

    /// 空集合
    pub const fn empty() -> Self {
        Self(0)
    }

    /// 原始位值
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// 是否包含 `other` 的全部位
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// 加入 `other` 的全部位
    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    /// 已置位能力的接口名称
    pub fn names(self) -> Vec<&'static str> {
        Self::NAMED
            .iter()
            .filter(|(bit, _)| self.contains(*bit))
            .map(|(_, name)| *name)
            .collect()
    }

    /// 移除 `other` 的全部位
    pub fn remove(&mut self, other: Self) {
        self.0 &= !other.0;
    }
}

impl BitOr for Capabilities {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Capabilities {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// 组合效果中的一项
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompositeEffect {
    /// 播放该原语前的延迟（毫秒）
    #[cfg_attr(feature = "serde", serde(default))]
    pub delay_ms: i32,
    /// 原语
    pub primitive: CompositePrimitive,
    /// 强度缩放 [0.0, 1.0]
    pub scale: f32,
}

/// PWLE 主动段：在 `duration_ms` 内从起点线性变化到终点
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActivePwle {
    pub start_amplitude: f32,
    pub start_frequency: f32,
    pub end_amplitude: f32,
    pub end_frequency: f32,
    pub duration_ms: i32,
}

/// PWLE 刹车段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BrakingPwle {
    pub braking: Braking,
    pub duration_ms: i32,
}

/// PWLE 原语
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum PrimitivePwle {
    Active(ActivePwle),
    Braking(BrakingPwle),
}

impl PrimitivePwle {
    /// 声明的时长（毫秒）
    pub fn duration_ms(&self) -> i32 {
        match self {
            PrimitivePwle::Active(active) => active.duration_ms,
            PrimitivePwle::Braking(braking) => braking.duration_ms,
        }
    }
}

impl From<ActivePwle> for PrimitivePwle {
    fn from(active: ActivePwle) -> Self {
        PrimitivePwle::Active(active)
    }
}

impl From<BrakingPwle> for PrimitivePwle {
    fn from(braking: BrakingPwle) -> Self {
        PrimitivePwle::Braking(braking)
    }
}
