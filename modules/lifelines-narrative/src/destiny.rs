//! The hand-written story returned for the special couple.

use std::sync::LazyLock;

use lifelines_common::{Timeline, TimelineEvent};

struct DestinyEntry {
    year: i32,
    distance: u8,
    emotion_score: u8,
    phase: &'static str,
    text: &'static str,
}

static DESTINY: LazyLock<Timeline> = LazyLock::new(|| {
    let events = ENTRIES
        .iter()
        .map(|e| TimelineEvent::new(e.year, e.text, e.distance, e.emotion_score, Some(e.phase)))
        .collect();
    Timeline::new(events).expect("destiny story satisfies the timeline contract")
});

/// The fixed 2018–2028 arc. Same contents on every call.
pub fn get() -> Timeline {
    DESTINY.clone()
}

const ENTRIES: &[DestinyEntry] = &[
    DestinyEntry {
        year: 2018,
        distance: 3,
        emotion_score: 10,
        phase: "💕 6.25 在一起",
        text: "高一下学期的夏天，6月25日，这个平凡又特别的日子。李彦和李梦祥在那个闷热的奶茶店，确定了彼此的心意。没有轰轰烈烈的表白，只有两颗年轻的心，在青春里悄悄靠近。从此，校园里多了一对的身影。",
    },
    DestinyEntry {
        year: 2019,
        distance: 2,
        emotion_score: 10,
        phase: "🌸 青春正好",
        text: "高二高三的时光，是最纯粹懵懂的甜蜜。在同一层楼上课、有时一起吃饭、一起在公园漫步。小纸条，带的零食，晚自习后操场上的散步，都成了最珍贵的回忆。备战高考的日子里，彼此是最温暖的陪伴。那时候觉得，只要和你在一起，未来就什么都不怕。",
    },
    DestinyEntry {
        year: 2020,
        distance: 35,
        emotion_score: 7,
        phase: "🚂 异地开始",
        text: "高考结束，成绩揭晓。—李彦去了安阳，李梦祥去了南京。从河南到江苏，800多公里的距离，从此思念要跨越大半个中国。临别那天，两人都没哭，只是紧紧握着对方的手说：'等我'。",
    },
    DestinyEntry {
        year: 2021,
        distance: 50,
        emotion_score: 5,
        phase: "📱 思念与等待",
        text: "大一到大二，异地恋进入最难熬的阶段。安阳到南京，没有直达的高铁，每一次见面都要精心计划。视频通话从每天变成隔天，话题从分享日常变成了沉默。疫情让见面变得更加奢侈，思念在距离中慢慢发酵成焦虑。",
    },
    DestinyEntry {
        year: 2022,
        distance: 60,
        emotion_score: 4,
        phase: "💔 裂痕渐生",
        text: "大三，李梦祥开始准备考研，压力与日俱增。李彦试图理解和支持同时也在忙自己的事业，但两个人的生活节奏越来越不同步。他在图书馆刷题到深夜，她在等着那个越来越晚的晚安。交流变少了，争吵变多了，冷战也变多了。曾经无话不谈的两个人，开始不知道该说什么。",
    },
    DestinyEntry {
        year: 2023,
        distance: 95,
        emotion_score: 1,
        phase: "💔 分手",
        text: "大四，李梦祥考研结束后的某天，积压已久的情感终于爆发。那些委屈、那些不理解、那些异地的心酸，全都化成了伤人的话。最后，两个人都沉默了。'我们...分开吧。' 五年的感情，在那个寒冷的冬夜画上了句号。",
    },
    DestinyEntry {
        year: 2024,
        distance: 85,
        emotion_score: 2,
        phase: "👤 各自天涯",
        text: "李彦毕业后开始工作，李梦祥考上了研究生。两个人的生活，彻底变成了两条平行线。假装对方已经不存在。可是深夜失眠的时候，还是会忍不住点开那些舍不得删的聊天记录。",
    },
    DestinyEntry {
        year: 2025,
        distance: 70,
        emotion_score: 4,
        phase: "🌱 各自成长",
        text: "时间是最好的解药。李彦在工作中找到了自己的节奏，李梦祥的研究生生活也渐入佳境。曾经那些刻骨铭心的痛，慢慢变成了偶尔想起时嘴角的一丝苦笑。他们都在学着和过去和解，和自己和解。",
    },
    DestinyEntry {
        year: 2026,
        distance: 40,
        emotion_score: 7,
        phase: "💬 重新联系",
        text: "2026年的某一天，一条微信消息打破了两年多的沉默。李彦鼓起的勇气，让两个人都红了眼眶。(这部分不太对)从小心翼翼的寒暄，到深夜里说不完的话。原来这些年，彼此都没有真正放下过。",
    },
    DestinyEntry {
        year: 2026,
        distance: 25,
        emotion_score: 8,
        phase: "💫 命运重启",
        text: "他们开始在网上分享各自的生活，聊工作、聊理想、聊这些年的成长与遗憾。虽然还没见面，但那种熟悉的感觉，那种只有对方才能给的安心，又悄悄回来了。命运的齿轮正在缓缓转动，故事还在继续... ✨",
    },
    DestinyEntry {
        year: 2027,
        distance: 15,
        emotion_score: 9,
        phase: "🌟 未完待续",
        text: "也许有一天，他们会在某个城市重逢。也许会一起喝杯咖啡，聊聊这些年错过的时光。也许会再次牵起对方的手，也许只是相视一笑。但无论结局如何，这段故事都已经是彼此生命中，最特别的存在。",
    },
    DestinyEntry {
        year: 2028,
        distance: 0,
        emotion_score: 10,
        phase: "💑 兜兜转转，还是你",
        text: "兜兜转转，还是你。那些年少时许下的承诺，那些以为再也回不去的过往，都在时间的沉淀中变成了命中注定。有些人走着走着就散了，有些人散了还会再相遇。而你，是我绑了一大圈，还是想要回到的原点。💕",
    },
];
