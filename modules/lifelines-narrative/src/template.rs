//! Offline fallback stories.
//!
//! A small library of relationship archetypes, each an ordered list of event
//! templates with `{name1}` / `{name2}` slots and years relative to an anchor.
//! Nothing here touches the network, so this path is always available.

use chrono::Datelike;
use lifelines_common::{Timeline, TimelineEvent};
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Archetype {
    Friendship,
    Family,
    Partnership,
    Romance,
}

impl Archetype {
    pub const ALL: [Archetype; 4] = [
        Archetype::Friendship,
        Archetype::Family,
        Archetype::Partnership,
        Archetype::Romance,
    ];

    fn templates(self) -> &'static [EventTemplate] {
        match self {
            Archetype::Friendship => FRIENDSHIP,
            Archetype::Family => FAMILY,
            Archetype::Partnership => PARTNERSHIP,
            Archetype::Romance => ROMANCE,
        }
    }
}

impl std::fmt::Display for Archetype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Archetype::Friendship => write!(f, "friendship"),
            Archetype::Family => write!(f, "family"),
            Archetype::Partnership => write!(f, "partnership"),
            Archetype::Romance => write!(f, "romance"),
        }
    }
}

struct EventTemplate {
    years_before: i32,
    distance: u8,
    emotion_score: u8,
    phase: &'static str,
    text: &'static str,
}

/// Builds a timeline from a randomly chosen archetype.
///
/// The default generator follows the clock: every story ends in the current
/// UTC year at the time it is built.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateGenerator {
    pinned_year: Option<i32>,
}

impl TemplateGenerator {
    /// Pin the year of the final event in every archetype.
    pub fn new(anchor_year: i32) -> Self {
        Self {
            pinned_year: Some(anchor_year),
        }
    }

    pub fn anchor_year(&self) -> i32 {
        self.pinned_year.unwrap_or_else(|| chrono::Utc::now().year())
    }

    /// Pick an archetype with the thread-local RNG.
    pub fn generate(&self, name1: &str, name2: &str) -> Timeline {
        self.generate_with(&mut rand::rng(), name1, name2)
    }

    /// Pick an archetype uniformly from `rng`. Seed the RNG for reproducible output.
    pub fn generate_with<R: Rng>(&self, rng: &mut R, name1: &str, name2: &str) -> Timeline {
        let archetype = Archetype::ALL[rng.random_range(0..Archetype::ALL.len())];
        self.build(archetype, name1, name2)
    }

    pub fn build(&self, archetype: Archetype, name1: &str, name2: &str) -> Timeline {
        let anchor_year = self.anchor_year();
        let events = archetype
            .templates()
            .iter()
            .map(|t| TimelineEvent {
                year: anchor_year - t.years_before,
                event: fill(t.text, name1, name2),
                distance: t.distance,
                emotion_score: t.emotion_score,
                phase: Some(t.phase.to_string()),
            })
            .collect();

        Timeline::new(events).expect("archetype templates satisfy the timeline contract")
    }
}

/// Single-pass placeholder substitution. Names are inserted verbatim, so a
/// name that itself looks like `{name2}` is never expanded again.
fn fill(template: &str, name1: &str, name2: &str) -> String {
    let mut out = String::with_capacity(template.len() + name1.len() + name2.len());
    let mut rest = template;

    while let Some(pos) = rest.find('{') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        if let Some(after) = tail.strip_prefix("{name1}") {
            out.push_str(name1);
            rest = after;
        } else if let Some(after) = tail.strip_prefix("{name2}") {
            out.push_str(name2);
            rest = after;
        } else {
            out.push('{');
            rest = &tail[1..];
        }
    }

    out.push_str(rest);
    out
}

// ---------------------------------------------------------------------------
// Archetype library
// ---------------------------------------------------------------------------

const FRIENDSHIP: &[EventTemplate] = &[
    EventTemplate {
        years_before: 8,
        distance: 65,
        emotion_score: 5,
        phase: "🤝 初识",
        text: "{name1}和{name2}在大学的社团活动中相识。一个是摄影社的骨干，一个是文学社的才子/才女。因为一次联合活动，两人开始有了交集。",
    },
    EventTemplate {
        years_before: 7,
        distance: 35,
        emotion_score: 7,
        phase: "👫 并肩",
        text: "共同筹备校庆晚会的那段时间，{name1}和{name2}几乎形影不离。深夜的排练室，一起吃的泡面，成为了珍贵的回忆。",
    },
    EventTemplate {
        years_before: 6,
        distance: 15,
        emotion_score: 9,
        phase: "🎓 挚友",
        text: "毕业季来临，两人才发现对方已经成为了生命中不可或缺的存在。那张毕业合影，至今还放在钱包里。",
    },
    EventTemplate {
        years_before: 4,
        distance: 40,
        emotion_score: 6,
        phase: "📱 牵挂",
        text: "各自工作后，见面的机会越来越少。但每次相聚，都能立刻回到从前无话不谈的状态。",
    },
    EventTemplate {
        years_before: 2,
        distance: 20,
        emotion_score: 8,
        phase: "💪 支撑",
        text: "{name1}遇到了人生低谷，第一个想到的人就是{name2}。那通深夜的电话，让一切阴霾都散去了。",
    },
    EventTemplate {
        years_before: 0,
        distance: 10,
        emotion_score: 9,
        phase: "✨ 知己",
        text: "时光荏苒，{name1}和{name2}的友情经受住了时间的考验。也许不常见面，但彼此都知道，那个人一直都在。",
    },
];

const FAMILY: &[EventTemplate] = &[
    EventTemplate {
        years_before: 20,
        distance: 5,
        emotion_score: 10,
        phase: "👶 新生",
        text: "医院的产房里，{name2}的第一声啼哭，让{name1}的眼眶湿润了。从此，生命有了新的意义。",
    },
    EventTemplate {
        years_before: 15,
        distance: 8,
        emotion_score: 9,
        phase: "🎠 陪伴",
        text: "童年时光，{name1}陪着{name2}度过了无数个周末。公园里的秋千、动物园的长颈鹿、睡前的故事书...",
    },
    EventTemplate {
        years_before: 8,
        distance: 60,
        emotion_score: 3,
        phase: "💢 冲突",
        text: "青春期的叛逆来得猝不及防。争吵、冷战、摔门声...那段时间，两人之间仿佛隔着一堵墙。",
    },
    EventTemplate {
        years_before: 5,
        distance: 45,
        emotion_score: 6,
        phase: "✈️ 远行",
        text: "{name2}考上了理想的大学，离开家的那天，{name1}偷偷抹去了眼角的泪水。",
    },
    EventTemplate {
        years_before: 2,
        distance: 25,
        emotion_score: 8,
        phase: "💝 理解",
        text: "长大后才明白，那些曾经不理解的严厉，都是深沉的爱。一通电话，说出了迟到多年的'谢谢'。",
    },
    EventTemplate {
        years_before: 0,
        distance: 10,
        emotion_score: 9,
        phase: "👨‍👩‍👧 家人",
        text: "如今{name1}和{name2}的关系，更像是朋友。可以聊心事、可以开玩笑，血浓于水的羁绊，永远不会改变。",
    },
];

const PARTNERSHIP: &[EventTemplate] = &[
    EventTemplate {
        years_before: 6,
        distance: 55,
        emotion_score: 6,
        phase: "🤝 结识",
        text: "{name1}和{name2}在一次创业大赛上相遇。两人的想法不谋而合，一拍即合决定组队。",
    },
    EventTemplate {
        years_before: 5,
        distance: 25,
        emotion_score: 5,
        phase: "💪 坚持",
        text: "创业初期的艰辛超乎想象。资金短缺、技术瓶颈、市场冷淡...但两人互相打气，熬过了最难的日子。",
    },
    EventTemplate {
        years_before: 4,
        distance: 70,
        emotion_score: 3,
        phase: "⚔️ 分歧",
        text: "关于公司发展方向，两人产生了严重的分歧。会议室里的争执，差点让合作走到尽头。",
    },
    EventTemplate {
        years_before: 3,
        distance: 30,
        emotion_score: 7,
        phase: "🤝 和解",
        text: "冷静下来后，两人选择坦诚沟通。原来，分歧的背后是对公司同样的热爱。",
    },
    EventTemplate {
        years_before: 1,
        distance: 15,
        emotion_score: 9,
        phase: "🏆 成功",
        text: "公司终于迎来了突破。站在领奖台上，两人相视一笑——所有的付出都值得了。",
    },
    EventTemplate {
        years_before: 0,
        distance: 10,
        emotion_score: 9,
        phase: "🚀 未来",
        text: "如今{name1}和{name2}不仅是合作伙伴，更是彼此最信任的人。未来的路，继续并肩前行。",
    },
];

const ROMANCE: &[EventTemplate] = &[
    EventTemplate {
        years_before: 9,
        distance: 70,
        emotion_score: 6,
        phase: "📚 偶遇",
        text: "{name1}在图书馆借走了{name2}找了很久的那本书。还书那天，两人在借阅台前聊了整整一个下午。",
    },
    EventTemplate {
        years_before: 8,
        distance: 30,
        emotion_score: 8,
        phase: "🌷 心动",
        text: "一起看的第一场电影，第一次牵手的那个路口。{name1}和{name2}慢慢走进了彼此的生活。",
    },
    EventTemplate {
        years_before: 7,
        distance: 10,
        emotion_score: 10,
        phase: "💞 热恋",
        text: "{name2}把{name1}介绍给了所有的朋友。那一年的每一个周末，都只属于他们两个人。",
    },
    EventTemplate {
        years_before: 5,
        distance: 55,
        emotion_score: 3,
        phase: "🌧️ 距离",
        text: "工作把两人分到了不同的城市。加班、时差、错过的电话，争吵一次比一次激烈。",
    },
    EventTemplate {
        years_before: 4,
        distance: 80,
        emotion_score: 2,
        phase: "💔 分开",
        text: "又一次争吵之后，两人都累了。他们决定暂时分开，各自冷静一段时间。",
    },
    EventTemplate {
        years_before: 2,
        distance: 35,
        emotion_score: 6,
        phase: "📞 重逢",
        text: "{name1}在旧相册里翻到两人的合影，终于拨通了那个熟悉的号码。电话那头，{name2}沉默了很久，然后轻声说：'我也一直在想你。'",
    },
    EventTemplate {
        years_before: 0,
        distance: 5,
        emotion_score: 10,
        phase: "💍 相守",
        text: "经历了分分合合，{name1}和{name2}决定不再错过。这一次，他们学会了好好说话，也学会了彼此等待。",
    },
];
