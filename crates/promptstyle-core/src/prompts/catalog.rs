use crate::model::BaseQuestion;

/// Fixed question catalog, ids 1..=50.
pub const BASE_QUESTIONS: [BaseQuestion; 50] = [
    q(1, "science", "Why is the sky blue?"),
    q(2, "science", "How do vaccines work?"),
    q(3, "science", "What causes earthquakes?"),
    q(4, "science", "Why do we dream?"),
    q(5, "science", "How does photosynthesis work?"),
    q(6, "technology", "What is machine learning?"),
    q(7, "technology", "How does WiFi work?"),
    q(8, "technology", "What is blockchain?"),
    q(9, "technology", "How do touchscreens work?"),
    q(10, "technology", "What is cloud computing?"),
    q(11, "history", "Why did the Roman Empire fall?"),
    q(12, "history", "What caused World War 1?"),
    q(13, "social", "Why do people procrastinate?"),
    q(14, "social", "What makes a good leader?"),
    q(15, "social", "Why is education important?"),
    q(16, "practical", "How can I improve my memory?"),
    q(17, "practical", "What's the best way to learn a language?"),
    q(18, "practical", "How do I stay motivated?"),
    q(19, "practical", "What makes a healthy diet?"),
    q(20, "practical", "How can I sleep better?"),
    q(21, "opinion", "Is social media good or bad?"),
    q(22, "opinion", "Should we explore space?"),
    q(23, "opinion", "Is AI a threat to jobs?"),
    q(24, "opinion", "Are electric cars worth it?"),
    q(25, "opinion", "Is remote work better than office work?"),
    q(26, "philosophy", "What is happiness?"),
    q(27, "philosophy", "What is the meaning of life?"),
    q(28, "philosophy", "Is free will real?"),
    q(29, "philosophy", "What is consciousness?"),
    q(30, "philosophy", "What makes something beautiful?"),
    q(31, "creative", "Tell me a short story about a robot."),
    q(32, "creative", "Write a haiku about rain."),
    q(33, "creative", "Create a riddle about time."),
    q(34, "creative", "Describe an imaginary planet."),
    q(35, "creative", "Make up a superhero and their powers."),
    q(36, "math", "Why is zero important in math?"),
    q(37, "math", "What is infinity?"),
    q(38, "logic", "What is a logical fallacy?"),
    q(39, "logic", "How do you solve a problem step by step?"),
    q(40, "math", "Why do we need negative numbers?"),
    q(41, "nature", "How do birds know where to migrate?"),
    q(42, "nature", "What causes seasons?"),
    q(43, "nature", "Why are rainforests important?"),
    q(44, "environment", "What is climate change?"),
    q(45, "environment", "How can we reduce pollution?"),
    q(46, "health", "Why is exercise good for you?"),
    q(47, "health", "What is stress?"),
    q(48, "psychology", "Why do people lie?"),
    q(49, "psychology", "What causes fear?"),
    q(50, "psychology", "How does memory work?"),
];

const fn q(id: u32, topic: &'static str, question: &'static str) -> BaseQuestion {
    BaseQuestion {
        id,
        topic,
        question,
    }
}
