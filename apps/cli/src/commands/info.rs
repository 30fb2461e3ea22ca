//! 设备信息命令

use anyhow::Result;
use vibrator_driver::Vibrator;
use vibrator_driver::protocol::format::format_general;

fn join<T: ToString>(items: &[T]) -> String {
    items.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}

/// 打印能力、支持列表与频率参数
pub fn execute(vibrator: &Vibrator) -> Result<()> {
    let capabilities = vibrator.capabilities();
    println!(
        "能力位: {:#x} [{}]",
        capabilities.bits(),
        capabilities.names().join(" | ")
    );
    println!("预定义效果: {}", join(&vibrator.supported_effects()));
    println!("组合原语: {}", join(&vibrator.supported_primitives()));
    println!("刹车类型: {}", join(&vibrator.supported_braking()));
    println!(
        "组合限制: {} 项, 延迟 <= {} ms",
        vibrator.composition_size_max(),
        vibrator.composition_delay_max()
    );
    println!(
        "PWLE 限制: {} 段, 单段 <= {} ms",
        vibrator.pwle_composition_size_max(),
        vibrator.pwle_primitive_duration_max()
    );
    println!(
        "谐振频率: {} Hz, Q: {}, 最低频率: {} Hz, 分辨率: {} Hz",
        vibrator.resonant_frequency(),
        vibrator.q_factor(),
        vibrator.frequency_minimum(),
        vibrator.frequency_resolution()
    );

    match vibrator.bandwidth_amplitude_map() {
        Ok(map) => {
            let map: Vec<String> = map.into_iter().map(format_general).collect();
            println!("带宽-幅度表: {}", map.join(", "));
        },
        Err(e) if e.is_unsupported() => println!("带宽-幅度表: (不支持)"),
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
