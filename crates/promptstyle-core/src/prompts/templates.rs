/// Colloquial register: short, informal, emotional markers.
pub const HUMAN_STYLE_TEMPLATES: [&str; 10] = [
    "Hey, quick question - {question}",
    "So I was wondering, {question} Any ideas?",
    "{question} I've always been curious about this!",
    "Okay so {question} Like, what's the deal?",
    "Random thought but {question}",
    "{question} Been thinking about this lately...",
    "Help me out here - {question}",
    "Umm, this might be dumb but {question}",
    "So {question} Explain it simply pls?",
    "{question} Just curious haha",
];

/// Formal register: long, structured, explicit requests for detail.
pub const LLM_STYLE_TEMPLATES: [&str; 10] = [
    "I would like to request a comprehensive explanation regarding the following topic: {question} Please provide a detailed and well-structured response.",
    "In order to enhance my understanding of this subject matter, I am seeking clarification on the following: {question} Kindly elaborate on the key concepts and provide relevant examples.",
    "The following query pertains to a topic I wish to explore in depth: {question} I would appreciate a thorough explanation that addresses the fundamental aspects and implications.",
    "I am conducting research and require detailed information on the following matter: {question} Please provide an organized response covering the main points systematically.",
    "For educational purposes, I would like to understand the following concept more thoroughly: {question} A comprehensive breakdown of the topic would be greatly appreciated.",
    "I am interested in gaining a deeper understanding of the following subject: {question} Please provide an informative and well-articulated explanation.",
    "In an effort to expand my knowledge base, I would like to inquire about the following: {question} A detailed response addressing the core principles would be beneficial.",
    "The topic I wish to explore is as follows: {question} I would appreciate if you could provide a systematic explanation covering all relevant aspects.",
    "I am seeking an in-depth explanation of the following concept: {question} Please structure your response to cover the key elements comprehensively.",
    "For the purpose of learning, I request detailed information regarding: {question} An organized and thorough explanation would be most helpful.",
];
