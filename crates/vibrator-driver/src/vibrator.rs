//! Vibrator 服务模块
//!
//! 提供对外的 `Vibrator` 结构体，实现服务接口的全部操作。

use crate::builder::{VibratorBuilder, VibratorConfig};
use crate::callback::VibratorCallback;
use crate::effects::{
    SUPPORTED_BRAKING, SUPPORTED_EFFECTS, SUPPORTED_PRIMITIVES, primitive_duration, waveform_for,
};
use crate::error::DriverError;
use crate::sink::{HapticNode, HapticSink};
use crate::timer::{millis, notify, notify_after, spawn_detached};
use std::sync::Arc;
use tracing::{debug, info, trace};
use vibrator_protocol::pwle::bandwidth_amplitude_map;
use vibrator_protocol::{
    Braking, COMPOSE_DELAY_MAX_MS, COMPOSE_PWLE_PRIMITIVE_DURATION_MAX_MS, COMPOSE_PWLE_SIZE_MAX,
    COMPOSE_SIZE_MAX, Capabilities, CompositeEffect, CompositePrimitive, Effect, EffectStrength,
    PWLE_FREQUENCY_MIN_HZ, PWLE_FREQUENCY_RESOLUTION_HZ, PrimitivePwle, PwleCommand, Q_FACTOR,
    RESONANT_FREQUENCY_HZ, VibratorError, encode_pwle,
};

/// 振动器服务
///
/// 所有操作都是同步的：参数校验、写设备节点，然后（如果有回调）启动
/// 后台线程在播放结束后通知。克隆开销很小，克隆体共享同一个写入端。
///
/// # 已知限制
///
/// 并发调用之间没有互斥，可能交错写入设备节点。
#[derive(Clone)]
pub struct Vibrator {
    sink: Arc<dyn HapticSink>,
    config: VibratorConfig,
}

impl Vibrator {
    pub(crate) fn new(sink: Arc<dyn HapticSink>, config: VibratorConfig) -> Self {
        Self { sink, config }
    }

    /// 创建 Builder
    pub fn builder() -> VibratorBuilder {
        VibratorBuilder::new()
    }

    /// 当前配置
    pub fn config(&self) -> &VibratorConfig {
        &self.config
    }

    fn write(&self, node: HapticNode, value: impl ToString) -> Result<(), DriverError> {
        self.sink.write(node, &value.to_string())?;
        Ok(())
    }

    // ========================================================================
    // 基础启停
    // ========================================================================

    /// 能力位
    pub fn capabilities(&self) -> Capabilities {
        trace!("Vibrator reporting capabilities");
        self.config.capabilities
    }

    /// 停止振动
    ///
    /// 先复位波形索引，再关闭输出，保证下一次 `on()` 不会误播固件波形。
    pub fn off(&self) -> Result<(), DriverError> {
        trace!("Vibrator off");
        self.write(HapticNode::Index, 0)?;
        self.write(HapticNode::Activate, 0)
    }

    /// 振动 `timeout_ms` 毫秒
    pub fn on(
        &self,
        timeout_ms: i32,
        callback: Option<Arc<dyn VibratorCallback>>,
    ) -> Result<(), DriverError> {
        trace!("Vibrator on for timeoutMs: {}", timeout_ms);
        self.write(HapticNode::Duration, timeout_ms)?;
        self.write(HapticNode::Activate, 1)?;

        if let Some(callback) = callback {
            notify_after("on", millis(timeout_ms.into()), callback)?;
        }
        Ok(())
    }

    // ========================================================================
    // 预定义效果
    // ========================================================================

    /// 播放预定义效果，返回播放时长（毫秒）
    ///
    /// 强度由固件波形决定，`strength` 只记录日志。
    ///
    /// # Errors
    /// - `UnsupportedOperation`: 效果不在 [`supported_effects`](Self::supported_effects) 中
    pub fn perform(
        &self,
        effect: Effect,
        strength: EffectStrength,
        callback: Option<Arc<dyn VibratorCallback>>,
    ) -> Result<i32, DriverError> {
        trace!("Vibrator perform");
        let waveform = waveform_for(effect)?;
        info!("Vibrator effect set to {} ({})", effect, strength);

        self.write(HapticNode::Index, waveform.index)?;
        let duration_ms = waveform.duration_ms as i32;
        self.on(duration_ms, None)?;

        if let Some(callback) = callback {
            notify_after("perform", millis(duration_ms.into()), callback)?;
        }
        Ok(duration_ms)
    }

    /// 支持的预定义效果
    pub fn supported_effects(&self) -> Vec<Effect> {
        SUPPORTED_EFFECTS.to_vec()
    }

    /// 设置幅度
    ///
    /// 驱动不支持幅度控制，只校验范围 `(0.0, 1.0]`。
    pub fn set_amplitude(&self, amplitude: f32) -> Result<(), DriverError> {
        trace!("Vibrator set amplitude: {}", amplitude);
        if !(amplitude > 0.0 && amplitude <= 1.0) {
            return Err(VibratorError::InvalidArgument(format!(
                "amplitude {} not in (0, 1]",
                amplitude
            ))
            .into());
        }
        Ok(())
    }

    /// 设置外部控制（仅记录）
    pub fn set_external_control(&self, enabled: bool) -> Result<(), DriverError> {
        trace!("Vibrator set external control: {}", enabled);
        Ok(())
    }

    // ========================================================================
    // 组合效果
    // ========================================================================

    /// 组合效果中单个原语前的最大延迟（毫秒）
    pub fn composition_delay_max(&self) -> i32 {
        COMPOSE_DELAY_MAX_MS
    }

    /// 组合效果的最大原语数量
    pub fn composition_size_max(&self) -> usize {
        COMPOSE_SIZE_MAX
    }

    /// 支持的组合原语
    pub fn supported_primitives(&self) -> Vec<CompositePrimitive> {
        SUPPORTED_PRIMITIVES.to_vec()
    }

    /// 原语播放时长（毫秒）
    pub fn primitive_duration(&self, primitive: CompositePrimitive) -> Result<i32, DriverError> {
        Ok(primitive_duration(primitive)?)
    }

    /// 播放组合效果
    ///
    /// 先整体校验，任何一项非法都不会启动播放。播放在后台线程中按顺序进行：
    /// 每一项先等待 `delay_ms`，再等待原语时长，全部结束后通知回调。
    ///
    /// # Errors
    /// - `InvalidArgument`: 数量超过上限、延迟超过上限或缩放不在 `[0, 1]`
    /// - `UnsupportedOperation`: 原语不受支持
    pub fn compose(
        &self,
        composite: &[CompositeEffect],
        callback: Option<Arc<dyn VibratorCallback>>,
    ) -> Result<(), DriverError> {
        if composite.len() > COMPOSE_SIZE_MAX {
            return Err(VibratorError::InvalidArgument(format!(
                "composition size {} exceeds {}",
                composite.len(),
                COMPOSE_SIZE_MAX
            ))
            .into());
        }

        let mut steps = Vec::with_capacity(composite.len());
        for (position, e) in composite.iter().enumerate() {
            if e.delay_ms > COMPOSE_DELAY_MAX_MS {
                return Err(VibratorError::InvalidArgument(format!(
                    "entry {}: delay {} ms exceeds {}",
                    position, e.delay_ms, COMPOSE_DELAY_MAX_MS
                ))
                .into());
            }
            if !(0.0..=1.0).contains(&e.scale) {
                return Err(VibratorError::InvalidArgument(format!(
                    "entry {}: scale {} not in [0, 1]",
                    position, e.scale
                ))
                .into());
            }
            steps.push((*e, primitive_duration(e.primitive)?));
        }

        spawn_detached("compose", move || {
            trace!("Starting compose on another thread");
            for (e, duration_ms) in steps {
                if e.delay_ms > 0 {
                    spin_sleep::sleep(millis(e.delay_ms.into()));
                }
                trace!("triggering primitive {} @ scale {}", e.primitive, e.scale);
                spin_sleep::sleep(millis(duration_ms.into()));
            }

            if let Some(callback) = callback {
                trace!("Notifying compose complete");
                notify("compose", callback.as_ref());
            }
        })
    }

    // ========================================================================
    // 常开效果
    // ========================================================================

    /// 支持的常开效果
    pub fn supported_always_on_effects(&self) -> Vec<Effect> {
        self.supported_effects()
    }

    /// 启用常开效果
    pub fn always_on_enable(
        &self,
        id: i32,
        effect: Effect,
        strength: EffectStrength,
    ) -> Result<(), DriverError> {
        if !self.supported_always_on_effects().contains(&effect) {
            return Err(VibratorError::UnsupportedOperation(format!(
                "always-on effect {} not supported",
                effect
            ))
            .into());
        }
        trace!("Enabling always-on ID {} with {}/{}", id, effect, strength);
        Ok(())
    }

    /// 禁用常开效果
    pub fn always_on_disable(&self, id: i32) -> Result<(), DriverError> {
        trace!("Disabling always-on ID {}", id);
        Ok(())
    }

    // ========================================================================
    // 频率特性
    // ========================================================================

    /// 谐振频率（Hz）
    pub fn resonant_frequency(&self) -> f32 {
        RESONANT_FREQUENCY_HZ
    }

    /// 品质因数
    pub fn q_factor(&self) -> f32 {
        Q_FACTOR
    }

    /// 频率分辨率（Hz）
    pub fn frequency_resolution(&self) -> f32 {
        PWLE_FREQUENCY_RESOLUTION_HZ
    }

    /// 最低频率（Hz）
    pub fn frequency_minimum(&self) -> f32 {
        PWLE_FREQUENCY_MIN_HZ
    }

    /// 带宽-幅度表
    ///
    /// # Errors
    /// - `UnsupportedOperation`: 未启用 `FREQUENCY_CONTROL` 能力
    pub fn bandwidth_amplitude_map(&self) -> Result<Vec<f32>, DriverError> {
        if !self.capabilities().contains(Capabilities::FREQUENCY_CONTROL) {
            return Err(VibratorError::UnsupportedOperation(
                "bandwidth amplitude map requires frequency control".to_string(),
            )
            .into());
        }
        Ok(bandwidth_amplitude_map())
    }

    // ========================================================================
    // PWLE
    // ========================================================================

    /// 单个 PWLE 原语的最大时长（毫秒）
    pub fn pwle_primitive_duration_max(&self) -> i32 {
        COMPOSE_PWLE_PRIMITIVE_DURATION_MAX_MS
    }

    /// PWLE 组合的最大原语数量
    pub fn pwle_composition_size_max(&self) -> usize {
        COMPOSE_PWLE_SIZE_MAX
    }

    /// 支持的刹车类型
    pub fn supported_braking(&self) -> Vec<Braking> {
        SUPPORTED_BRAKING.to_vec()
    }

    /// 播放 PWLE 组合
    ///
    /// 编码成功后把指令串写入 PWLE 节点，并在总时长结束后通知回调。
    /// 编码失败时不写入任何节点。
    pub fn compose_pwle(
        &self,
        composite: &[PrimitivePwle],
        callback: Option<Arc<dyn VibratorCallback>>,
    ) -> Result<PwleCommand, DriverError> {
        let pwle = encode_pwle(
            composite,
            self.pwle_composition_size_max(),
            SUPPORTED_BRAKING,
        )?;
        debug!(
            "PWLE composition: {} segments, {} ms",
            pwle.segment_count, pwle.total_duration_ms
        );
        trace!("PWLE command: {}", pwle.command);

        self.write(HapticNode::Pwle, &pwle.command)?;

        if let Some(callback) = callback {
            notify_after(
                "composePwle",
                millis(pwle.total_duration_ms.into()),
                callback,
            )?;
        }
        Ok(pwle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::callback::ChannelCallback;
    use crate::mock::MockSink;
    use std::time::Duration;
    use vibrator_protocol::{ActivePwle, BrakingPwle};

    fn setup() -> (Vibrator, Arc<MockSink>) {
        let sink = Arc::new(MockSink::new());
        let vibrator = Vibrator::new(sink.clone(), VibratorConfig::default());
        (vibrator, sink)
    }

    #[test]
    fn test_off_writes_index_then_activate() {
        let (vibrator, sink) = setup();
        vibrator.off().unwrap();
        assert_eq!(
            sink.writes(),
            vec![
                (HapticNode::Index, "0".to_string()),
                (HapticNode::Activate, "0".to_string()),
            ]
        );
    }

    #[test]
    fn test_on_writes_duration_then_activate() {
        let (vibrator, sink) = setup();
        vibrator.on(250, None).unwrap();
        assert_eq!(
            sink.writes(),
            vec![
                (HapticNode::Duration, "250".to_string()),
                (HapticNode::Activate, "1".to_string()),
            ]
        );
    }

    #[test]
    fn test_on_propagates_sink_failure() {
        let (vibrator, sink) = setup();
        sink.fail_on(HapticNode::Activate);
        let err = vibrator.on(10, None).unwrap_err();
        assert!(matches!(err, DriverError::Sink(_)));
    }

    #[test]
    fn test_perform_click() {
        let (vibrator, sink) = setup();
        let duration = vibrator.perform(Effect::Click, EffectStrength::Medium, None).unwrap();
        assert_eq!(duration, 15);
        assert_eq!(
            sink.writes(),
            vec![
                (HapticNode::Index, "2".to_string()),
                (HapticNode::Duration, "15".to_string()),
                (HapticNode::Activate, "1".to_string()),
            ]
        );
    }

    #[test]
    fn test_perform_unsupported_effect_writes_nothing() {
        let (vibrator, sink) = setup();
        let err = vibrator.perform(Effect::Ringtone7, EffectStrength::Strong, None).unwrap_err();
        assert!(err.is_unsupported());
        assert!(sink.writes().is_empty());
    }

    #[test]
    fn test_perform_callback_fires() {
        let (vibrator, _sink) = setup();
        let (callback, rx) = ChannelCallback::new();
        vibrator.perform(Effect::Tick, EffectStrength::Light, Some(Arc::new(callback))).unwrap();
        assert!(rx.recv_timeout(Duration::from_secs(2)).is_ok());
    }

    #[test]
    fn test_set_amplitude_range() {
        let (vibrator, _sink) = setup();
        assert!(vibrator.set_amplitude(1.0).is_ok());
        assert!(vibrator.set_amplitude(0.01).is_ok());
        assert!(vibrator.set_amplitude(0.0).unwrap_err().is_invalid_argument());
        assert!(vibrator.set_amplitude(1.5).unwrap_err().is_invalid_argument());
        assert!(vibrator.set_amplitude(f32::NAN).is_err());
    }

    #[test]
    fn test_compose_validation() {
        let (vibrator, _sink) = setup();
        let ok = CompositeEffect {
            delay_ms: 0,
            primitive: CompositePrimitive::Click,
            scale: 0.5,
        };

        let too_long = CompositeEffect { delay_ms: 1001, ..ok };
        assert!(vibrator.compose(&[too_long], None).unwrap_err().is_invalid_argument());

        let bad_scale = CompositeEffect { scale: 1.1, ..ok };
        assert!(vibrator.compose(&[ok, bad_scale], None).unwrap_err().is_invalid_argument());

        let oversized = vec![ok; COMPOSE_SIZE_MAX + 1];
        assert!(vibrator.compose(&oversized, None).unwrap_err().is_invalid_argument());

        assert!(vibrator.compose(&[], None).is_ok());
    }

    #[test]
    fn test_compose_callback_after_playback() {
        let (vibrator, _sink) = setup();
        let (callback, rx) = ChannelCallback::new();
        let composite = [
            CompositeEffect {
                delay_ms: 5,
                primitive: CompositePrimitive::Noop,
                scale: 0.0,
            },
            CompositeEffect {
                delay_ms: 0,
                primitive: CompositePrimitive::LightTick,
                scale: 1.0,
            },
        ];
        let start = std::time::Instant::now();
        vibrator.compose(&composite, Some(Arc::new(callback))).unwrap();
        let fired_at = rx.recv_timeout(Duration::from_secs(2)).unwrap();
        assert!(fired_at.duration_since(start) >= Duration::from_millis(105));
    }

    #[test]
    fn test_always_on() {
        let (vibrator, _sink) = setup();
        assert!(vibrator.always_on_enable(1, Effect::Thud, EffectStrength::Strong).is_ok());
        assert!(
            vibrator
                .always_on_enable(1, Effect::Ringtone2, EffectStrength::Strong)
                .unwrap_err()
                .is_unsupported()
        );
        assert!(vibrator.always_on_disable(1).is_ok());
    }

    #[test]
    fn test_bandwidth_map_requires_frequency_control() {
        let (vibrator, _sink) = setup();
        assert!(vibrator.bandwidth_amplitude_map().unwrap_err().is_unsupported());

        let config = VibratorConfig {
            capabilities: Capabilities::FREQUENCY_CONTROL,
        };
        let vibrator = Vibrator::new(Arc::new(MockSink::new()), config);
        assert_eq!(vibrator.bandwidth_amplitude_map().unwrap().len(), 21);
    }

    #[test]
    fn test_device_constants() {
        let (vibrator, _sink) = setup();
        assert_eq!(vibrator.resonant_frequency(), 150.0);
        assert_eq!(vibrator.q_factor(), 11.0);
        assert_eq!(vibrator.frequency_resolution(), 1.0);
        assert_eq!(vibrator.frequency_minimum(), 140.0);
        assert_eq!(vibrator.pwle_primitive_duration_max(), 16383);
        assert_eq!(vibrator.pwle_composition_size_max(), 127);
        assert_eq!(vibrator.composition_delay_max(), 1000);
        assert_eq!(vibrator.composition_size_max(), 256);
        assert_eq!(vibrator.supported_braking(), vec![Braking::None, Braking::Clab]);
        assert_eq!(vibrator.supported_primitives().len(), 9);
        assert_eq!(vibrator.supported_effects(), vibrator.supported_always_on_effects());
    }

    #[test]
    fn test_compose_pwle_writes_command() {
        let (vibrator, sink) = setup();
        let composite = [
            PrimitivePwle::Active(ActivePwle {
                start_amplitude: 0.5,
                start_frequency: 150.0,
                end_amplitude: 0.8,
                end_frequency: 150.0,
                duration_ms: 100,
            }),
            PrimitivePwle::Braking(BrakingPwle {
                braking: Braking::Clab,
                duration_ms: 50,
            }),
        ];
        let pwle = vibrator.compose_pwle(&composite, None).unwrap();
        assert_eq!(pwle.total_duration_ms, 150);
        assert_eq!(sink.writes(), vec![(HapticNode::Pwle, pwle.command.clone())]);
        assert!(pwle.command.starts_with("S:0,WF:4,RP:0,WT:0,T0:0,L0:0.5,F0:150,"));
    }

    #[test]
    fn test_compose_pwle_invalid_writes_nothing() {
        let (vibrator, sink) = setup();
        let composite = [PrimitivePwle::Active(ActivePwle {
            start_amplitude: 0.5,
            start_frequency: 161.0,
            end_amplitude: 0.8,
            end_frequency: 150.0,
            duration_ms: 100,
        })];
        assert!(vibrator.compose_pwle(&composite, None).unwrap_err().is_invalid_argument());
        assert!(vibrator.compose_pwle(&[], None).unwrap_err().is_invalid_argument());
        assert!(sink.writes().is_empty());
    }
}
