use lifelines_common::{timeline_schema, Timeline, TimelineEvent};

/// Fewest events the model is asked for. Validation accepts down to
/// [`Timeline::MIN_EVENTS`].
pub const REQUESTED_MIN_EVENTS: usize = 8;

pub fn system_prompt() -> String {
    let schema = serde_json::to_string_pretty(&timeline_schema()).unwrap_or_default();

    format!(
        r#"你是一位富有创意的命运叙述者。根据两个人的名字，创作一段两人人生交织的故事。

## 关系类型
关系可以是任何一种，不要局限于爱情：
- 爱情：恋人、夫妻
- 友情：挚友、知己、发小
- 亲情：兄弟姐妹、父母子女
- 师生、战友、合作伙伴等
根据名字给你的感觉自由选择。

## 时间设定
- 可以从任何合理的年代开始，可以设定在过去、现在或未来
- 时间跨度 5 到 20 年

## 故事结构
1. 故事必须有起伏：相遇 -> 建立联系 -> 加深了解 -> 经历考验 -> 结局
2. 结局可以是圆满的重逢、长久的情谊、令人惋惜的失去，或开放式结尾
3. 每个事件包含字段：year（年份，按时间先后排列）、event（事件描述）、distance、emotion_score、phase（阶段名）
4. distance 取值 0-{max_distance}（0 = 关系最亲密，{max_distance} = 完全陌生或断联）
5. emotion_score 取值 0-{max_emotion}（{max_emotion} = 最温暖幸福，0 = 最低落悲伤）
6. 包含 {min_events}-{max_events} 个事件节点
7. 故事要感人、有细节、有画面感

## 输出格式
输出必须符合以下 JSON Schema：
{schema}

示例：
[
    {{"year": 2020, "event": "描述...", "distance": 50, "emotion_score": 5, "phase": "阶段名"}}
]

只返回 JSON 数组本身，不要任何其他文字、解释或 markdown 代码块标记。"#,
        max_distance = TimelineEvent::MAX_DISTANCE,
        max_emotion = TimelineEvent::MAX_EMOTION_SCORE,
        min_events = REQUESTED_MIN_EVENTS,
        max_events = Timeline::MAX_EVENTS,
        schema = schema,
    )
}

pub fn user_prompt(name1: &str, name2: &str) -> String {
    format!(
        "请为 {name1} 和 {name2} 创作一段命运交织的人生故事。关系类型和时代背景由你自由选择。"
    )
}
